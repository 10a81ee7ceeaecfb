//! Result assembly: identifiers paired with scores, best first.

use entopsis_common::{CriterionSpec, Direction, RankError};
use serde::Serialize;

/// One line of the final ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// Dense 0-based position, 0 = best
    pub rank: usize,
    pub identifier: String,
    /// Input row index
    pub row: usize,
    pub score: f64,
}

/// Ranking sorted by score descending; ties keep input row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedResult {
    pub entries: Vec<RankedEntry>,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter()
    }

    /// The best `n` entries.
    pub fn top(&self, n: usize) -> &[RankedEntry] {
        &self.entries[..n.min(self.entries.len())]
    }
}

/// Weight derivation details for one criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionWeight {
    pub column: String,
    pub direction: Direction,
    pub entropy: f64,
    pub divergence: f64,
    pub weight: f64,
}

/// One record's score with the distances it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    pub rank: usize,
    pub identifier: String,
    /// Input row index
    pub row: usize,
    pub score: f64,
    pub d_plus: f64,
    pub d_minus: f64,
}

/// Full breakdown of a ranking run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankReport {
    pub criteria: Vec<CriterionWeight>,
    pub ideal: Vec<f64>,
    pub anti_ideal: Vec<f64>,
    /// In ranking order
    pub records: Vec<ScoredRecord>,
}

impl RankReport {
    pub fn ranking(&self) -> RankedResult {
        RankedResult {
            entries: self
                .records
                .iter()
                .map(|r| RankedEntry {
                    rank: r.rank,
                    identifier: r.identifier.clone(),
                    row: r.row,
                    score: r.score,
                })
                .collect(),
        }
    }

    pub fn weight_of(&self, column: &str) -> Option<f64> {
        self.criteria.iter().find(|c| c.column == column).map(|c| c.weight)
    }

    pub(crate) fn criterion_weights(
        criteria: &[CriterionSpec],
        entropy: &[f64],
        divergence: &[f64],
        weights: &[f64],
    ) -> Vec<CriterionWeight> {
        criteria
            .iter()
            .enumerate()
            .map(|(j, spec)| CriterionWeight {
                column: spec.column.clone(),
                direction: spec.direction,
                entropy: entropy[j],
                divergence: divergence[j],
                weight: weights[j],
            })
            .collect()
    }
}

/// Pair identifiers with scores (aligned by row) and sort best first.
///
/// The sort is stable, so equal scores keep their input order. Fails with
/// [`RankError::LengthMismatch`] unless there is one identifier per score.
pub fn assemble_ranking(identifiers: &[String], scores: &[f64]) -> Result<RankedResult, RankError> {
    if identifiers.len() != scores.len() {
        return Err(RankError::LengthMismatch {
            what: "identifiers",
            expected: scores.len(),
            actual: identifiers.len(),
        });
    }
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let entries = order
        .into_iter()
        .enumerate()
        .map(|(rank, row)| RankedEntry {
            rank,
            identifier: identifiers[row].clone(),
            row,
            score: scores[row],
        })
        .collect();
    Ok(RankedResult { entries })
}
