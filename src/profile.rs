use tracing::warn;

use crate::error::ProfileError;
use crate::models::{Gender, Major, StudentProfile, YearOfStudy};

/// Raw profile form values, as text, before intake.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub gpa: String,
    pub major: String,
    pub year_of_study: String,
    pub financial_need: bool,
    pub gender: String,
    pub ethnicity: String,
    pub interests: String,
}

impl ProfileForm {
    pub fn submit(&self) -> Result<StudentProfile, ProfileError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProfileError::MissingName);
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err(ProfileError::MissingEmail);
        }
        if !looks_like_email(email) {
            return Err(ProfileError::InvalidEmail(email.to_string()));
        }

        let year_of_study = optional(&self.year_of_study)
            .map(|value| {
                value
                    .parse::<YearOfStudy>()
                    .map_err(ProfileError::UnknownYearOfStudy)
            })
            .transpose()?;
        let gender = optional(&self.gender)
            .map(|value| value.parse::<Gender>().map_err(ProfileError::UnknownGender))
            .transpose()?;

        Ok(StudentProfile {
            name: name.to_string(),
            email: email.to_string(),
            gpa: parse_gpa(&self.gpa),
            major: optional(&self.major).map(Major::from_form),
            year_of_study,
            financial_need: self.financial_need,
            gender,
            ethnicity: self.ethnicity.trim().to_string(),
            interests: parse_interests(&self.interests),
        })
    }
}

/// Parses GPA form text. Anything unparseable counts as "no GPA" so scoring
/// can skip the GPA adjustment instead of failing.
pub fn parse_gpa(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.parse::<f64>() {
        Ok(gpa) if gpa.is_finite() => {
            if !(0.0..=4.0).contains(&gpa) {
                warn!(gpa, "GPA outside the 0.00-4.00 form range");
            }
            Some(gpa)
        }
        _ => {
            warn!(raw, "ignoring unparseable GPA");
            None
        }
    }
}

fn parse_interests(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|interest| !interest.is_empty())
        .map(str::to_string)
        .collect()
}

fn optional(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
