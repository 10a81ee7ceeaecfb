//! Run configuration for a ranking job.
//!
//! Users describe a job in YAML, JSON or TOML: which column identifies a
//! record, which criteria to use and in which direction, and how the result
//! should be written. Command-line flags can override any of it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::criteria::CriterionSpec;
use crate::error::{EntopsisError, RankError, Result};

/// Complete ranking job configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankConfig {
    /// Column holding the stable record key
    #[serde(default = "default_identifier_column")]
    pub identifier_column: String,

    /// Ordered criteria; weight alignment follows this order
    #[serde(default)]
    pub criteria: Vec<CriterionSpec>,

    /// Input options
    #[serde(default)]
    pub input: InputConfig,

    /// Output options
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_identifier_column() -> String { "FCIL_CDE".to_string() }

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            identifier_column: default_identifier_column(),
            criteria: vec![],
            input: InputConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

// ── Input Configuration ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Field delimiter of the input file
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_delimiter() -> char { ',' }

impl Default for InputConfig {
    fn default() -> Self {
        Self { delimiter: default_delimiter() }
    }
}

// ── Output Configuration ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (csv, json)
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Header of the score column
    #[serde(default = "default_score_column")]
    pub score_column: String,

    /// Only write the best N records
    #[serde(default)]
    pub top_n: Option<usize>,

    /// Prepend a 0-based rank column
    #[serde(default)]
    pub include_rank: bool,
}

fn default_format() -> OutputFormat { OutputFormat::Csv }
fn default_score_column() -> String { "topsis_score".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            score_column: default_score_column(),
            top_n: None,
            include_rank: false,
        }
    }
}

// ── Helper Methods ─────────────────────────────────────────────────────────────

impl RankConfig {
    /// Load from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load from TOML file
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load, picking the parser from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        debug!("Loading rank config from {:?}", path);
        match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml(path),
            "json" => Self::from_json(path),
            "toml" => Self::from_toml(path),
            other => Err(EntopsisError::Config(format!(
                "unsupported config extension '{other}' (expected yaml, yml, json or toml)"
            ))),
        }
    }

    /// Save to YAML file
    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the job is runnable before any data is touched.
    pub fn validate(&self) -> Result<()> {
        if self.identifier_column.trim().is_empty() {
            return Err(EntopsisError::Config("identifier_column must not be empty".into()));
        }
        if self.criteria.is_empty() {
            return Err(EntopsisError::Config("at least one criterion is required".into()));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.criteria.iter().find(|c| !seen.insert(c.column.as_str())) {
            return Err(RankError::DuplicateCriterion { column: dup.column.clone() }.into());
        }
        if !self.input.delimiter.is_ascii() {
            return Err(EntopsisError::Config(format!(
                "delimiter '{}' must be a single ASCII character",
                self.input.delimiter
            )));
        }
        if self.output.top_n == Some(0) {
            return Err(EntopsisError::Config("output.top_n must be at least 1".into()));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
