//! Resolution of the effective job configuration: config file first, then
//! command-line overrides on top.

use anyhow::{Context, Result};
use entopsis_common::{CriterionSpec, OutputFormat, RankConfig};
use std::path::Path;
use tracing::info;

/// Flag values that override the config file when present.
#[derive(Debug, Default)]
pub struct Overrides {
    pub criteria: Vec<CriterionSpec>,
    pub identifier_column: Option<String>,
    pub format: Option<OutputFormat>,
    pub top_n: Option<usize>,
    pub score_column: Option<String>,
    pub with_rank: bool,
    pub delimiter: Option<char>,
}

pub fn resolve(config_path: Option<&Path>, overrides: Overrides) -> Result<RankConfig> {
    let mut config = match config_path {
        Some(path) => {
            let c = RankConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            info!("Loaded job config from {}", path.display());
            c
        }
        None => RankConfig::default(),
    };

    if !overrides.criteria.is_empty() {
        config.criteria = overrides.criteria;
    }
    if let Some(id) = overrides.identifier_column {
        config.identifier_column = id;
    }
    if let Some(format) = overrides.format {
        config.output.format = format;
    }
    if overrides.top_n.is_some() {
        config.output.top_n = overrides.top_n;
    }
    if let Some(score_column) = overrides.score_column {
        config.output.score_column = score_column;
    }
    if overrides.with_rank {
        config.output.include_rank = true;
    }
    if let Some(d) = overrides.delimiter {
        config.input.delimiter = d;
    }

    config.validate().context("invalid job configuration")?;
    Ok(config)
}

/// Persist the effective configuration so a run can be repeated with `-c`.
pub fn save(config: &RankConfig, path: &Path) -> Result<()> {
    config
        .to_yaml(path)
        .with_context(|| format!("failed to save config {}", path.display()))?;
    info!("Saved job config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use entopsis_common::Direction;
    use std::io::Write;

    #[test]
    fn test_flags_only() {
        let config = resolve(
            None,
            Overrides {
                criteria: vec![CriterionSpec::minimize("cost")],
                top_n: Some(2),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(config.identifier_column, "FCIL_CDE");
        assert_eq!(config.criteria[0].direction, Direction::Minimize);
        assert_eq!(config.output.top_n, Some(2));
    }

    #[test]
    fn test_no_criteria_is_rejected() {
        assert!(resolve(None, Overrides::default()).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "identifier_column: site\ncriteria:\n  - column: beds\n    direction: max\noutput:\n  format: json\n"
        )
        .unwrap();

        let config = resolve(
            Some(file.path()),
            Overrides {
                format: Some(OutputFormat::Csv),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(config.identifier_column, "site");
        assert_eq!(config.criteria, vec![CriterionSpec::maximize("beds")]);
        assert_eq!(config.output.format, OutputFormat::Csv);
    }

    #[test]
    fn test_saved_config_resolves_to_same_job() {
        let config = resolve(
            None,
            Overrides {
                criteria: vec![CriterionSpec::maximize("beds"), CriterionSpec::minimize("wait_days")],
                identifier_column: Some("site".into()),
                with_rank: true,
                ..Default::default()
            },
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.yaml");
        save(&config, &path).unwrap();

        let reloaded = resolve(Some(&path), Overrides::default()).unwrap();
        assert_eq!(reloaded.identifier_column, "site");
        assert_eq!(reloaded.criteria, config.criteria);
        assert!(reloaded.output.include_rank);
    }

    #[test]
    fn test_duplicate_criteria_rejected() {
        let err = resolve(
            None,
            Overrides {
                criteria: vec![CriterionSpec::maximize("beds"), CriterionSpec::minimize("beds")],
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("'beds' selected more than once"), "{err:#}");
    }
}
