//! entopsis-common — Shared table model, criterion types, errors and run
//! configuration used across all Entopsis crates.

pub mod error;
pub mod table;
pub mod criteria;
pub mod rank_config;

// Re-export commonly used types
pub use error::{EntopsisError, RankError, Result};
pub use table::{Record, Table, Value};
pub use criteria::{CriterionSpec, Direction};
pub use rank_config::{InputConfig, OutputConfig, OutputFormat, RankConfig};
