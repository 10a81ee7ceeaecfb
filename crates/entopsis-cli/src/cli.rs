use clap::{Parser, Subcommand, ValueEnum};
use entopsis_common::{CriterionSpec, OutputFormat};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Identifier and score columns
    Csv,
    /// Full report with weights and distances
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "entopsis")]
#[command(about = "Rank records with entropy-weighted TOPSIS", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the records of a delimited file
    Rank {
        /// Input file with a header row
        #[arg(short, long)]
        input: PathBuf,

        /// Job config (yaml, json or toml)
        #[arg(short, long, env = "ENTOPSIS_CONFIG")]
        config: Option<PathBuf>,

        /// Criterion as column[:max|min]; repeat for several. Replaces the config's criteria
        #[arg(long = "criterion", short = 'C', value_name = "COLUMN:DIRECTION")]
        criteria: Vec<CriterionSpec>,

        /// Identifier column
        #[arg(long = "id")]
        identifier_column: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Only write the best N records
        #[arg(long = "top")]
        top_n: Option<usize>,

        /// Header of the score column
        #[arg(long)]
        score_column: Option<String>,

        /// Prepend a 0-based rank column to CSV output
        #[arg(long)]
        with_rank: bool,

        /// Field delimiter of the input file
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Also write the resolved job config to this YAML file
        #[arg(long, value_name = "PATH")]
        save_config: Option<PathBuf>,
    },

    /// List the numeric columns that can be used as criteria
    Columns {
        /// Input file with a header row
        #[arg(short, long)]
        input: PathBuf,

        /// Field delimiter of the input file
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },
}
