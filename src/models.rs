use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub amount: u64,
    pub deadline: DateTime<Utc>,
    pub match_score: u8,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub application_url: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub name: String,
    pub email: String,
    pub gpa: Option<f64>,
    pub major: Option<Major>,
    pub year_of_study: Option<YearOfStudy>,
    pub financial_need: bool,
    pub gender: Option<Gender>,
    pub ethnicity: String,
    pub interests: Vec<String>,
}

impl StudentProfile {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("there")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Major {
    ComputerScience,
    Engineering,
    Business,
    Biology,
    Mathematics,
    Psychology,
    ArtsAndDesign,
    Communications,
    Education,
    Nursing,
    Other,
    Custom(String),
}

impl Major {
    pub const OPTIONS: [Major; 11] = [
        Major::ComputerScience,
        Major::Engineering,
        Major::Business,
        Major::Biology,
        Major::Mathematics,
        Major::Psychology,
        Major::ArtsAndDesign,
        Major::Communications,
        Major::Education,
        Major::Nursing,
        Major::Other,
    ];

    pub fn label(&self) -> &str {
        match self {
            Major::ComputerScience => "Computer Science",
            Major::Engineering => "Engineering",
            Major::Business => "Business",
            Major::Biology => "Biology",
            Major::Mathematics => "Mathematics",
            Major::Psychology => "Psychology",
            Major::ArtsAndDesign => "Arts & Design",
            Major::Communications => "Communications",
            Major::Education => "Education",
            Major::Nursing => "Nursing",
            Major::Other => "Other",
            Major::Custom(value) => value,
        }
    }

    /// Resolves a form value to one of the listed majors, falling back to
    /// `Custom` for anything unrecognised. Accepts the exact display label or
    /// its lowercase kebab/snake spelling (`computer-science`,
    /// `arts_and_design`). Matching is case-sensitive.
    pub fn from_form(value: &str) -> Major {
        let value = value.trim();
        Major::OPTIONS
            .iter()
            .find(|major| {
                let kebab = major.cli_spelling();
                major.label() == value || kebab == value || kebab.replace('-', "_") == value
            })
            .cloned()
            .unwrap_or_else(|| Major::Custom(value.to_string()))
    }

    fn cli_spelling(&self) -> String {
        self.label()
            .to_lowercase()
            .replace(" & ", "-and-")
            .replace(' ', "-")
    }
}

impl fmt::Display for Major {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Major {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum YearOfStudy {
    Freshman,
    Sophomore,
    Junior,
    Senior,
    Graduate,
}

impl FromStr for YearOfStudy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "freshman" => Ok(YearOfStudy::Freshman),
            "sophomore" => Ok(YearOfStudy::Sophomore),
            "junior" => Ok(YearOfStudy::Junior),
            "senior" => Ok(YearOfStudy::Senior),
            "graduate" => Ok(YearOfStudy::Graduate),
            _ => Err(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Female,
    Male,
    NonBinary,
    PreferNotToSay,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_key(value).as_str() {
            "female" => Ok(Gender::Female),
            "male" => Ok(Gender::Male),
            "nonbinary" => Ok(Gender::NonBinary),
            "prefernottosay" => Ok(Gender::PreferNotToSay),
            _ => Err(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Urgent,
    Soon,
    Upcoming,
}

impl UrgencyLevel {
    pub fn badge(&self) -> &'static str {
        match self {
            UrgencyLevel::Urgent => "Apply Now!",
            UrgencyLevel::Soon => "Closing Soon",
            UrgencyLevel::Upcoming => "Open",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Match,
    Deadline,
    Amount,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Match => "Best Match",
            SortKey::Deadline => "Deadline (Soonest)",
            SortKey::Amount => "Amount (Highest)",
        }
    }
}

fn normalize_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '&')
        .map(|c| c.to_ascii_lowercase())
        .collect::<String>()
        .replace('&', "and")
}
