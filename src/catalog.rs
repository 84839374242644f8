use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::models::Scholarship;
use crate::scoring::MAX_SCORE;

/// Anything that can supply the scholarship catalog.
pub trait CatalogSource {
    fn load(&self) -> Result<Vec<Scholarship>, CatalogError>;
}

/// Built-in reference catalog. Deadlines are placed relative to `now`.
#[derive(Debug, Clone, Copy)]
pub struct SeedCatalog {
    pub now: DateTime<Utc>,
}

impl CatalogSource for SeedCatalog {
    fn load(&self) -> Result<Vec<Scholarship>, CatalogError> {
        let seeds = vec![
            (
                "1",
                "Future Leaders STEM Scholarship",
                "National Science Foundation",
                10_000,
                5,
                95,
                ["GPA 3.5+", "STEM Major", "US Citizen"],
                "Supporting the next generation of STEM innovators with merit-based funding for undergraduate studies.",
                "STEM",
            ),
            (
                "2",
                "Community Impact Grant",
                "Gates Foundation",
                15_000,
                21,
                88,
                ["GPA 3.0+", "Community Service", "Financial Need"],
                "Empowering students who demonstrate exceptional commitment to community service and social impact.",
                "Community",
            ),
            (
                "3",
                "Women in Technology Award",
                "Tech Industry Alliance",
                8_000,
                45,
                92,
                ["Female Identifying", "Tech/CS Major", "Sophomore+"],
                "Advancing diversity in technology by supporting women pursuing careers in computer science and engineering.",
                "Diversity",
            ),
            (
                "4",
                "First Generation College Fund",
                "Education Equity Foundation",
                12_000,
                14,
                85,
                ["First-Gen Student", "GPA 2.8+", "Financial Need"],
                "Breaking barriers for first-generation college students with comprehensive financial support.",
                "First-Gen",
            ),
            (
                "5",
                "Creative Arts Excellence Award",
                "National Arts Council",
                5_000,
                60,
                78,
                ["Arts/Design Major", "Portfolio Required", "Full-time Student"],
                "Celebrating exceptional talent in visual arts, design, and creative disciplines.",
                "Arts",
            ),
            (
                "6",
                "Minority Business Leaders Scholarship",
                "Chamber of Commerce",
                7_500,
                3,
                90,
                ["Business Major", "Underrepresented Minority", "GPA 3.2+"],
                "Fostering diverse leadership in business by supporting underrepresented students.",
                "Business",
            ),
        ];

        Ok(seeds
            .into_iter()
            .map(
                |(id, name, provider, amount, days_out, baseline, requirements, description, category)| {
                    Scholarship {
                        id: id.to_string(),
                        name: name.to_string(),
                        provider: provider.to_string(),
                        amount,
                        deadline: self.now + Duration::days(days_out),
                        match_score: baseline,
                        requirements: requirements.iter().map(|r| r.to_string()).collect(),
                        description: description.to_string(),
                        application_url: "https://example.com/apply".to_string(),
                        category: category.to_string(),
                    }
                },
            )
            .collect())
    }
}

/// A JSON array of scholarships in the camelCase catalog shape.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    pub path: PathBuf,
}

impl CatalogSource for JsonCatalog {
    fn load(&self) -> Result<Vec<Scholarship>, CatalogError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let scholarships: Vec<Scholarship> = serde_json::from_str(&raw)?;
        validate(&scholarships)?;
        info!(path = %self.path.display(), count = scholarships.len(), "loaded JSON catalog");
        Ok(scholarships)
    }
}

/// A CSV catalog. Rows without an id get a generated `import-<uuid>` id.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    pub path: PathBuf,
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct CsvRow {
    #[serde(default)]
    id: Option<String>,
    name: String,
    provider: String,
    amount: u64,
    deadline: String,
    match_score: u32,
    #[serde(default)]
    requirements: String,
    #[serde(default)]
    description: String,
    application_url: String,
    category: String,
}

impl CsvCatalog {
    /// Loads the catalog and reports how many ids had to be generated.
    pub fn load_with_stats(&self) -> Result<(Vec<Scholarship>, usize), CatalogError> {
        let file = std::fs::File::open(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);
        let mut scholarships = Vec::new();
        let mut generated = 0usize;

        for result in reader.deserialize::<CsvRow>() {
            let row = result?;
            let id = match row.id.as_deref().map(str::trim) {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => {
                    generated += 1;
                    format!("import-{}", Uuid::new_v4())
                }
            };
            let deadline = parse_deadline(&row.deadline).ok_or_else(|| {
                CatalogError::InvalidDeadline {
                    id: id.clone(),
                    value: row.deadline.clone(),
                }
            })?;
            if row.match_score > u32::from(MAX_SCORE) {
                return Err(CatalogError::ScoreOutOfRange {
                    id,
                    score: row.match_score,
                });
            }

            scholarships.push(Scholarship {
                id,
                name: row.name,
                provider: row.provider,
                amount: row.amount,
                deadline,
                match_score: row.match_score as u8,
                requirements: row
                    .requirements
                    .split(';')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect(),
                description: row.description,
                application_url: row.application_url,
                category: row.category,
            });
        }

        validate(&scholarships)?;
        info!(
            path = %self.path.display(),
            count = scholarships.len(),
            generated_ids = generated,
            "loaded CSV catalog"
        );
        Ok((scholarships, generated))
    }
}

impl CatalogSource for CsvCatalog {
    fn load(&self) -> Result<Vec<Scholarship>, CatalogError> {
        self.load_with_stats().map(|(scholarships, _)| scholarships)
    }
}

/// Picks a loader for `path` by its extension.
pub fn from_path(path: &Path) -> Result<Box<dyn CatalogSource>, CatalogError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => Ok(Box::new(JsonCatalog {
            path: path.to_path_buf(),
        })),
        Some("csv") => Ok(Box::new(CsvCatalog {
            path: path.to_path_buf(),
        })),
        _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Writes `scholarships` to `path` as JSON or CSV, chosen by extension.
pub fn write_catalog(path: &Path, scholarships: &[Scholarship]) -> Result<(), CatalogError> {
    let io_error = |source: std::io::Error| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            let body = serde_json::to_string_pretty(scholarships)?;
            std::fs::write(path, body).map_err(io_error)?;
        }
        Some(ext) if ext.eq_ignore_ascii_case("csv") => {
            let file = std::fs::File::create(path).map_err(io_error)?;
            let mut writer = csv::Writer::from_writer(file);
            for scholarship in scholarships {
                writer.serialize(CsvRow {
                    id: Some(scholarship.id.clone()),
                    name: scholarship.name.clone(),
                    provider: scholarship.provider.clone(),
                    amount: scholarship.amount,
                    deadline: scholarship.deadline.to_rfc3339(),
                    match_score: u32::from(scholarship.match_score),
                    requirements: scholarship.requirements.join(";"),
                    description: scholarship.description.clone(),
                    application_url: scholarship.application_url.clone(),
                    category: scholarship.category.clone(),
                })?;
            }
            writer.flush().map_err(io_error)?;
        }
        _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
    }

    debug!(path = %path.display(), count = scholarships.len(), "wrote catalog");
    Ok(())
}

fn parse_deadline(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn validate(scholarships: &[Scholarship]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for scholarship in scholarships {
        if scholarship.match_score > MAX_SCORE {
            return Err(CatalogError::ScoreOutOfRange {
                id: scholarship.id.clone(),
                score: u32::from(scholarship.match_score),
            });
        }
        if !seen.insert(scholarship.id.as_str()) {
            return Err(CatalogError::DuplicateId(scholarship.id.clone()));
        }
    }
    Ok(())
}
