//! Entropy weighting.
//!
//! A criterion whose normalised values are spread evenly over the records
//! carries little information (entropy close to 1) and is downweighted; a
//! criterion concentrated on a few records has low entropy and is upweighted.
//!
//! ```text
//! P[i][j] = X[i][j] / Σ_i X[i][j]
//! E[j]    = -1/ln(n) · Σ_i P[i][j] · ln(P[i][j] + ε)
//! d[j]    = 1 - E[j]
//! w[j]    = d[j] / Σ_j d[j]
//! ```

use entopsis_common::RankError;
use serde::Serialize;
use tracing::debug;

use crate::normalise::NormalizedMatrix;

/// Smoothing term that keeps `ln(0)` out of the entropy sum.
pub const ENTROPY_EPSILON: f64 = 1e-12;

/// Divergences at or below this level are ε residue, not information.
/// Evenly spread columns land around `1e-12` instead of exactly 0.
pub const DIVERGENCE_TOLERANCE: f64 = 1e-9;

/// Per-criterion entropy, divergence and the derived weight, in criterion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntropyWeights {
    pub entropy: Vec<f64>,
    pub divergence: Vec<f64>,
    pub weights: Vec<f64>,
}

/// Derive one weight per criterion from the normalised matrix.
///
/// A column whose divergence does not exceed [`DIVERGENCE_TOLERANCE`] is
/// reported with divergence 0 and gets weight 0.
///
/// Fails with [`RankError::DegenerateColumn`] if a column sums to zero and
/// with [`RankError::DegenerateWeights`] if no column has divergence above
/// the tolerance.
pub fn entropy_weights(normalized: &NormalizedMatrix) -> Result<EntropyWeights, RankError> {
    let x = &normalized.values;
    let n = x.rows();
    if n < 2 {
        return Err(RankError::InsufficientRecords { found: n });
    }
    let k = 1.0 / (n as f64).ln();

    let mut entropy = Vec::with_capacity(x.cols());
    for (j, spec) in normalized.criteria.iter().enumerate() {
        let total: f64 = x.column(j).sum();
        if !(total > 0.0) {
            return Err(RankError::DegenerateColumn { column: spec.column.clone() });
        }
        let h: f64 = x
            .column(j)
            .map(|v| {
                let p = v / total;
                p * (p + ENTROPY_EPSILON).ln()
            })
            .sum();
        entropy.push(-k * h);
    }

    let divergence: Vec<f64> = entropy
        .iter()
        .map(|e| match 1.0 - e {
            d if d > DIVERGENCE_TOLERANCE => d,
            _ => 0.0,
        })
        .collect();
    let total_divergence: f64 = divergence.iter().sum();
    if !(total_divergence > DIVERGENCE_TOLERANCE && total_divergence.is_finite()) {
        return Err(RankError::DegenerateWeights);
    }

    let weights: Vec<f64> = divergence.iter().map(|d| d / total_divergence).collect();
    for (spec, w) in normalized.criteria.iter().zip(&weights) {
        debug!(column = %spec.column, weight = w, "entropy weight");
    }

    Ok(EntropyWeights { entropy, divergence, weights })
}
