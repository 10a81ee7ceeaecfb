//! Entopsis — entropy-weighted TOPSIS ranking.
//! Entry point for the command-line binary.

mod cli;
mod io;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use entopsis_common::OutputFormat;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::settings::Overrides;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for the ranking itself
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("entopsis=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Rank {
            input,
            config,
            criteria,
            identifier_column,
            output,
            format,
            top_n,
            score_column,
            with_rank,
            delimiter,
            save_config,
        } => {
            let overrides = Overrides {
                criteria,
                identifier_column,
                format: format.map(Into::into),
                top_n,
                score_column,
                with_rank,
                delimiter,
            };
            let config = settings::resolve(config.as_deref(), overrides)?;
            if let Some(path) = save_config.as_deref() {
                settings::save(&config, path)?;
            }
            info!(
                "Ranking {} on {} criteria: {}",
                input.display(),
                config.criteria.len(),
                config
                    .criteria
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            let table = io::load_csv_table(&input, config.input.delimiter).await?;
            let report = entopsis_ranker::rank_detailed(&table, &config.criteria, &config.identifier_column)
                .context("ranking failed")?;

            for c in &report.criteria {
                info!("  {:<24} {:>3}  weight {:.4}  entropy {:.4}", c.column, c.direction.as_str(), c.weight, c.entropy);
            }

            let rendered = match config.output.format {
                OutputFormat::Csv => {
                    let ranking = report.ranking();
                    let entries = match config.output.top_n {
                        Some(n) => ranking.top(n),
                        None => &ranking.entries[..],
                    };
                    io::render_csv(entries, &config.identifier_column, &config.output)?
                }
                OutputFormat::Json => io::render_json(&report, &config.identifier_column, &config.output)?,
            };
            io::write_output(output.as_deref(), &rendered).await?;
        }

        Commands::Columns { input, delimiter } => {
            let table = io::load_csv_table(&input, delimiter).await?;
            let numeric = table.numeric_columns();
            if numeric.is_empty() {
                tracing::warn!("No numeric columns found in {}", input.display());
            }
            for column in numeric {
                println!("{column}");
            }
        }
    }

    Ok(())
}
