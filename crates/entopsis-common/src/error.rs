use thiserror::Error;

/// Failures of the ranking pipeline itself.
///
/// Every variant is a precondition or data-quality violation. The pipeline
/// aborts on the first one it meets and never returns a partial ranking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error("invalid direction '{token}': expected max/maximize/1 or min/minimize/-1")]
    InvalidDirection { token: String },

    #[error("no criteria selected")]
    EmptySelection,

    #[error("at least 2 records are required, found {found}")]
    InsufficientRecords { found: usize },

    #[error("column '{column}' row {row}: value '{value}' is not a finite number")]
    NonNumericValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("column '{column}' has zero range (all values equal)")]
    DegenerateColumn { column: String },

    #[error("every criterion has zero divergence; weights are undefined")]
    DegenerateWeights,

    #[error("record {row} coincides with both the ideal and anti-ideal point")]
    UndefinedScore { row: usize },

    #[error("column '{column}' not found in table")]
    UnknownColumn { column: String },

    #[error("column '{column}' selected more than once")]
    DuplicateCriterion { column: String },

    #[error("{what}: expected {expected} values, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error)]
pub enum EntopsisError {
    #[error("Ranking error: {0}")]
    Rank(#[from] RankError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Table error: {0}")]
    Table(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EntopsisError>;
