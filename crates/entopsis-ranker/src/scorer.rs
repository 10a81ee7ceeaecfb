//! Ideal-point closeness scoring.
//!
//! The weighted matrix is compared against its per-column best (ideal) and
//! worst (anti-ideal) values. A record's score is its distance to the
//! anti-ideal point divided by the sum of both distances:
//!
//! `score = D⁻ / (D⁺ + D⁻)`, with `D±` Euclidean distances.

use entopsis_common::RankError;
use serde::Serialize;
use tracing::debug;

use crate::matrix::Matrix;
use crate::normalise::NormalizedMatrix;

/// Reference points, distances and closeness coefficients of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Closeness {
    /// Per-criterion maximum of the weighted matrix
    pub ideal: Vec<f64>,
    /// Per-criterion minimum of the weighted matrix
    pub anti_ideal: Vec<f64>,
    /// Distance of each record to the ideal point
    pub d_plus: Vec<f64>,
    /// Distance of each record to the anti-ideal point
    pub d_minus: Vec<f64>,
    /// Closeness coefficient of each record, in [0, 1]
    pub scores: Vec<f64>,
}

/// Compute closeness coefficients for every record, in row order.
///
/// Fails with [`RankError::LengthMismatch`] unless there is one weight per
/// criterion, and with [`RankError::UndefinedScore`] for a record at zero
/// distance from both reference points.
pub fn closeness_scores(
    normalized: &NormalizedMatrix,
    weights: &[f64],
) -> Result<Closeness, RankError> {
    if weights.len() != normalized.values.cols() {
        return Err(RankError::LengthMismatch {
            what: "weights",
            expected: normalized.values.cols(),
            actual: weights.len(),
        });
    }
    let weighted = normalized.values.scale_columns(weights);
    let (ideal, anti_ideal) = reference_points(&weighted);
    debug!(?ideal, ?anti_ideal, "reference points");

    let n = weighted.rows();
    let mut d_plus = Vec::with_capacity(n);
    let mut d_minus = Vec::with_capacity(n);
    let mut scores = Vec::with_capacity(n);

    for i in 0..n {
        let row = weighted.row(i);
        let dp = euclidean(row, &ideal);
        let dm = euclidean(row, &anti_ideal);
        let total = dp + dm;
        if !(total > 0.0) {
            return Err(RankError::UndefinedScore { row: i });
        }
        d_plus.push(dp);
        d_minus.push(dm);
        scores.push(dm / total);
    }

    Ok(Closeness { ideal, anti_ideal, d_plus, d_minus, scores })
}

fn reference_points(weighted: &Matrix) -> (Vec<f64>, Vec<f64>) {
    (0..weighted.cols())
        .map(|j| weighted.column_range(j).map_or((0.0, 0.0), |(lo, hi)| (hi, lo)))
        .unzip()
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use entopsis_common::CriterionSpec;

    fn normalized(columns: &[Vec<f64>]) -> NormalizedMatrix {
        NormalizedMatrix {
            criteria: (0..columns.len()).map(|j| CriterionSpec::maximize(format!("c{j}"))).collect(),
            values: Matrix::from_columns(columns),
        }
    }

    #[test]
    fn test_single_criterion_distances() {
        let c = closeness_scores(&normalized(&[vec![0.0, 0.5, 1.0]]), &[1.0]).unwrap();
        assert_eq!(c.ideal, vec![1.0]);
        assert_eq!(c.anti_ideal, vec![0.0]);
        assert_eq!(c.d_plus, vec![1.0, 0.5, 0.0]);
        assert_eq!(c.d_minus, vec![0.0, 0.5, 1.0]);
        assert_eq!(c.scores, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_two_criteria_tradeoff() {
        // Record 0 is best on c0, record 1 best on c1; c0 weighs more.
        let c = closeness_scores(
            &normalized(&[vec![1.0, 0.0, 0.5], vec![0.0, 1.0, 0.5]]),
            &[0.7, 0.3],
        )
        .unwrap();
        assert!(c.scores[0] > c.scores[1]);
        assert!(c.scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn test_zero_weights_give_undefined_score() {
        let err = closeness_scores(&normalized(&[vec![0.0, 1.0]]), &[0.0]).unwrap_err();
        assert_eq!(err, RankError::UndefinedScore { row: 0 });
    }

    #[test]
    fn test_weight_count_must_match_criteria() {
        let err = closeness_scores(&normalized(&[vec![0.0, 1.0], vec![1.0, 0.0]]), &[1.0]).unwrap_err();
        assert_eq!(err, RankError::LengthMismatch { what: "weights", expected: 2, actual: 1 });
    }
}
