//! entopsis-ranker — TOPSIS ranking with entropy-derived criterion weights.
//!
//! The pipeline runs four pure stages in order:
//! [`normalise`] → [`weights`] → [`scorer`] → [`ranking`].
//! [`rank`] and [`rank_detailed`] drive the whole thing.

pub mod matrix;
pub mod normalise;
pub mod weights;
pub mod scorer;
pub mod ranking;
pub mod pipeline;

pub use matrix::Matrix;
pub use normalise::{build_decision_matrix, normalise_matrix, DecisionMatrix, NormalizedMatrix};
pub use weights::{entropy_weights, EntropyWeights};
pub use scorer::{closeness_scores, Closeness};
pub use ranking::{assemble_ranking, CriterionWeight, RankReport, RankedEntry, RankedResult, ScoredRecord};
pub use pipeline::{rank, rank_detailed};
