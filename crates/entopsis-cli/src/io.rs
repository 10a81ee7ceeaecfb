//! Table loading and result writing around the ranking core.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use entopsis_common::{OutputConfig, Table, Value};
use entopsis_ranker::{RankReport, RankedEntry};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// Parse delimited text with a header row into a [`Table`].
///
/// Cells are kept as text (blank cells as `Value::Empty`) so identifiers such
/// as `00123` survive untouched; numeric coercion is the ranker's job.
pub fn parse_csv_table(content: &str, delimiter: char) -> Result<Table> {
    if !delimiter.is_ascii() {
        bail!("delimiter '{delimiter}' must be a single ASCII character");
    }
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        bail!("input has no header row");
    }

    let mut table = Table::new(headers)?;
    for (i, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("malformed row {i}"))?;
        let row: Vec<Value> = record.iter().map(Value::from_raw).collect();
        table.push_row(row)?;
    }
    Ok(table)
}

/// Load a delimited file from disk.
pub async fn load_csv_table(path: &Path, delimiter: char) -> Result<Table> {
    debug!("Loading table from {:?}", path);
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let table = parse_csv_table(&content, delimiter)?;
    info!("Loaded {} records with {} columns", table.len(), table.columns().len());
    Ok(table)
}

/// Two-column CSV (`identifier`, `score`), optionally with a leading rank.
pub fn render_csv(entries: &[RankedEntry], identifier_column: &str, output: &OutputConfig) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    if output.include_rank {
        writer.write_record(["rank", identifier_column, output.score_column.as_str()])?;
    } else {
        writer.write_record([identifier_column, output.score_column.as_str()])?;
    }
    for entry in entries {
        let score = entry.score.to_string();
        if output.include_rank {
            writer.write_record([entry.rank.to_string().as_str(), entry.identifier.as_str(), score.as_str()])?;
        } else {
            writer.write_record([entry.identifier.as_str(), score.as_str()])?;
        }
    }
    let bytes = writer.into_inner().context("failed to flush CSV output")?;
    Ok(String::from_utf8(bytes)?)
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    run_id: Uuid,
    generated_at: DateTime<Utc>,
    identifier_column: &'a str,
    score_column: &'a str,
    #[serde(flatten)]
    report: &'a RankReport,
}

/// JSON report with run metadata, weights, reference points and distances.
/// `top_n` truncates the records list.
pub fn render_json(report: &RankReport, identifier_column: &str, output: &OutputConfig) -> Result<String> {
    let mut report = report.clone();
    if let Some(n) = output.top_n {
        report.records.truncate(n);
    }
    let doc = JsonReport {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        identifier_column,
        score_column: &output.score_column,
        report: &report,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Write to `path`, or stdout when no path is given.
pub async fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            tokio::fs::write(path, content)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Result written to {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
