//! Decision matrix construction and min-max normalisation.
//!
//! Raw cells are coerced to numbers explicitly; any cell that is empty, not a
//! number, or not finite aborts the run with [`RankError::NonNumericValue`].
//! Each criterion column is then rescaled to [0, 1] so that 1 is always the
//! best value, whatever the criterion's direction.

use entopsis_common::{CriterionSpec, Direction, RankError, Table};
use std::collections::HashSet;
use tracing::debug;

use crate::matrix::Matrix;

/// Raw criterion values, one column per selected criterion, in selection order.
#[derive(Debug, Clone)]
pub struct DecisionMatrix {
    pub criteria: Vec<CriterionSpec>,
    pub values: Matrix,
}

/// Decision matrix rescaled so every entry lies in [0, 1].
#[derive(Debug, Clone)]
pub struct NormalizedMatrix {
    pub criteria: Vec<CriterionSpec>,
    pub values: Matrix,
}

/// Restrict `table` to the selected criteria and coerce every cell to `f64`.
pub fn build_decision_matrix(
    table: &Table,
    criteria: &[CriterionSpec],
) -> Result<DecisionMatrix, RankError> {
    if criteria.is_empty() {
        return Err(RankError::EmptySelection);
    }

    let mut seen = HashSet::new();
    for spec in criteria {
        if !seen.insert(spec.column.as_str()) {
            return Err(RankError::DuplicateCriterion { column: spec.column.clone() });
        }
        if !table.has_column(&spec.column) {
            return Err(RankError::UnknownColumn { column: spec.column.clone() });
        }
    }

    if table.len() < 2 {
        return Err(RankError::InsufficientRecords { found: table.len() });
    }

    let mut columns = Vec::with_capacity(criteria.len());
    for spec in criteria {
        let mut column = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            let cell = table.get(row, &spec.column);
            match cell.and_then(|v| v.as_f64()) {
                Some(x) => column.push(x),
                None => {
                    return Err(RankError::NonNumericValue {
                        column: spec.column.clone(),
                        row,
                        value: cell.map(ToString::to_string).unwrap_or_default(),
                    })
                }
            }
        }
        columns.push(column);
    }

    let values = Matrix::from_columns(&columns);
    debug!(rows = values.rows(), cols = values.cols(), "decision matrix built");
    Ok(DecisionMatrix { criteria: criteria.to_vec(), values })
}

/// Min-max normalise each column according to its direction.
///
/// Maximize: `(x - min) / (max - min)`. Minimize: `(max - x) / (max - min)`.
/// A column with zero range fails with [`RankError::DegenerateColumn`].
///
/// When `max - min` overflows (finite values of opposite sign near
/// `f64::MAX`), numerator and denominator are both halved first.
pub fn normalise_matrix(decision: &DecisionMatrix) -> Result<NormalizedMatrix, RankError> {
    let raw = &decision.values;
    let mut out = Matrix::zeros(raw.rows(), raw.cols());

    for (j, spec) in decision.criteria.iter().enumerate() {
        let degenerate = || RankError::DegenerateColumn { column: spec.column.clone() };
        let (min, max) = raw.column_range(j).ok_or_else(degenerate)?;
        let scale = if (max - min).is_finite() { 1.0 } else { 0.5 };
        let (min, max) = (min * scale, max * scale);
        let range = max - min;
        if !(range > 0.0) {
            return Err(degenerate());
        }
        for i in 0..raw.rows() {
            out.set(i, j, minmax(raw.get(i, j) * scale, min, max, range, spec.direction));
        }
        debug!(column = %spec.column, direction = %spec.direction, min, max, scale, "column normalised");
    }

    Ok(NormalizedMatrix { criteria: decision.criteria.clone(), values: out })
}

fn minmax(x: f64, min: f64, max: f64, range: f64, direction: Direction) -> f64 {
    let n = match direction {
        Direction::Maximize => (x - min) / range,
        Direction::Minimize => (max - x) / range,
    };
    // Rounding can only push n outside [0, 1] by an ulp; keep the invariant exact.
    n.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use entopsis_common::Value;

    fn table(values: &[&str]) -> Table {
        let mut t = Table::new(vec!["id".into(), "x".into()]).unwrap();
        for (i, v) in values.iter().enumerate() {
            t.push_row(vec![Value::from(format!("r{i}")), Value::from_raw(v)]).unwrap();
        }
        t
    }

    #[test]
    fn test_maximize_and_minimize() {
        let t = table(&["10", "20", "30"]);
        let d = build_decision_matrix(&t, &[CriterionSpec::maximize("x")]).unwrap();
        let n = normalise_matrix(&d).unwrap();
        assert_eq!(n.values.column(0).collect::<Vec<_>>(), vec![0.0, 0.5, 1.0]);

        let d = build_decision_matrix(&t, &[CriterionSpec::minimize("x")]).unwrap();
        let n = normalise_matrix(&d).unwrap();
        assert_eq!(n.values.column(0).collect::<Vec<_>>(), vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_constant_column_is_degenerate() {
        let t = table(&["7", "7", "7"]);
        let d = build_decision_matrix(&t, &[CriterionSpec::maximize("x")]).unwrap();
        assert_eq!(
            normalise_matrix(&d).unwrap_err(),
            RankError::DegenerateColumn { column: "x".into() }
        );
    }

    #[test]
    fn test_extreme_range_does_not_overflow() {
        let t = table(&["-1e308", "0", "1e308"]);
        let d = build_decision_matrix(&t, &[CriterionSpec::maximize("x")]).unwrap();
        let n = normalise_matrix(&d).unwrap();
        assert_eq!(n.values.column(0).collect::<Vec<_>>(), vec![0.0, 0.5, 1.0]);

        let d = build_decision_matrix(&t, &[CriterionSpec::minimize("x")]).unwrap();
        let n = normalise_matrix(&d).unwrap();
        assert_eq!(n.values.column(0).collect::<Vec<_>>(), vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_non_numeric_reports_row() {
        let t = table(&["1", "n/a", "3"]);
        let err = build_decision_matrix(&t, &[CriterionSpec::maximize("x")]).unwrap_err();
        assert_eq!(
            err,
            RankError::NonNumericValue { column: "x".into(), row: 1, value: "n/a".into() }
        );
    }

    #[test]
    fn test_missing_value_is_non_numeric() {
        let t = table(&["1", "", "3"]);
        let err = build_decision_matrix(&t, &[CriterionSpec::maximize("x")]).unwrap_err();
        assert!(matches!(err, RankError::NonNumericValue { row: 1, .. }));
    }

    #[test]
    fn test_selection_checks() {
        let t = table(&["1", "2"]);
        assert_eq!(build_decision_matrix(&t, &[]).unwrap_err(), RankError::EmptySelection);
        assert_eq!(
            build_decision_matrix(&t, &[CriterionSpec::maximize("y")]).unwrap_err(),
            RankError::UnknownColumn { column: "y".into() }
        );
        assert_eq!(
            build_decision_matrix(&t, &[CriterionSpec::maximize("x"), CriterionSpec::minimize("x")])
                .unwrap_err(),
            RankError::DuplicateCriterion { column: "x".into() }
        );
        let one = table(&["1"]);
        assert_eq!(
            build_decision_matrix(&one, &[CriterionSpec::maximize("x")]).unwrap_err(),
            RankError::InsufficientRecords { found: 1 }
        );
    }
}
