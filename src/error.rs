//! Typed errors for profile intake and catalog loading.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a submitted profile form cannot become a [`crate::models::StudentProfile`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("name is required")]
    MissingName,

    #[error("email is required")]
    MissingEmail,

    #[error("email address looks invalid: {0}")]
    InvalidEmail(String),

    #[error("unknown year of study: {0} (expected Freshman, Sophomore, Junior, Senior or Graduate)")]
    UnknownYearOfStudy(String),

    #[error("unknown gender: {0} (expected female, male, non-binary or prefer-not-to-say)")]
    UnknownGender(String),
}

/// Failures while loading a scholarship catalog from a data source.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV catalog: {0}")]
    Csv(#[from] csv::Error),

    #[error("scholarship {id}: unparseable deadline {value:?}")]
    InvalidDeadline { id: String, value: String },

    #[error("scholarship {id}: baseline match score {score} exceeds 100")]
    ScoreOutOfRange { id: String, score: u32 },

    #[error("duplicate scholarship id: {0}")]
    DuplicateId(String),

    #[error("unsupported catalog format: {0} (expected .json or .csv)")]
    UnsupportedFormat(PathBuf),
}
