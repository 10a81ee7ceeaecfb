//! End-to-end ranking: table + criteria in, ranked identifiers out.

use entopsis_common::{CriterionSpec, RankError, Table};
use tracing::{info, info_span, warn};

use crate::normalise::{build_decision_matrix, normalise_matrix};
use crate::ranking::{assemble_ranking, RankReport, RankedResult, ScoredRecord};
use crate::scorer::closeness_scores;
use crate::weights::entropy_weights;

/// Rank the records of `table` by TOPSIS closeness over `criteria`.
///
/// Pure and deterministic: the same input always yields the same ranking.
/// Aborts on the first input violation; no partial result is returned.
pub fn rank(
    table: &Table,
    criteria: &[CriterionSpec],
    identifier_column: &str,
) -> Result<RankedResult, RankError> {
    rank_detailed(table, criteria, identifier_column).map(|report| report.ranking())
}

/// Same pipeline as [`rank`], keeping weights, reference points and
/// per-record distances.
pub fn rank_detailed(
    table: &Table,
    criteria: &[CriterionSpec],
    identifier_column: &str,
) -> Result<RankReport, RankError> {
    let span = info_span!("rank", criteria = criteria.len(), records = table.len());
    let _enter = span.enter();

    let outcome = run(table, criteria, identifier_column);
    match &outcome {
        Ok(report) => info!(
            best = report.records.first().map(|r| r.identifier.as_str()).unwrap_or_default(),
            "ranking complete"
        ),
        Err(e) => warn!(error = %e, "ranking aborted"),
    }
    outcome
}

fn run(
    table: &Table,
    criteria: &[CriterionSpec],
    identifier_column: &str,
) -> Result<RankReport, RankError> {
    if criteria.is_empty() {
        return Err(RankError::EmptySelection);
    }
    if !table.has_column(identifier_column) {
        return Err(RankError::UnknownColumn { column: identifier_column.to_string() });
    }

    let decision = build_decision_matrix(table, criteria)?;
    let normalized = normalise_matrix(&decision)?;
    let weights = entropy_weights(&normalized)?;
    let closeness = closeness_scores(&normalized, &weights.weights)?;

    let identifiers: Vec<String> = (0..table.len())
        .map(|row| table.get(row, identifier_column).map(ToString::to_string).unwrap_or_default())
        .collect();

    let records = assemble_ranking(&identifiers, &closeness.scores)?
        .entries
        .into_iter()
        .map(|entry| ScoredRecord {
            d_plus: closeness.d_plus[entry.row],
            d_minus: closeness.d_minus[entry.row],
            rank: entry.rank,
            identifier: entry.identifier,
            row: entry.row,
            score: entry.score,
        })
        .collect();

    Ok(RankReport {
        criteria: RankReport::criterion_weights(
            criteria,
            &weights.entropy,
            &weights.divergence,
            &weights.weights,
        ),
        ideal: closeness.ideal,
        anti_ideal: closeness.anti_ideal,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use entopsis_common::Value;

    fn facilities() -> Table {
        let mut t = Table::new(vec!["FCIL_CDE".into(), "beds".into()]).unwrap();
        for (id, beds) in [("F1", 10.0), ("F2", 20.0), ("F3", 30.0)] {
            t.push_row(vec![Value::from(id), Value::Number(beds)]).unwrap();
        }
        t
    }

    #[test]
    fn test_three_record_example() {
        let report = rank_detailed(&facilities(), &[CriterionSpec::maximize("beds")], "FCIL_CDE").unwrap();
        assert_eq!(report.criteria[0].weight, 1.0);
        assert_eq!(report.ideal, vec![1.0]);
        assert_eq!(report.anti_ideal, vec![0.0]);

        let ranking = report.ranking();
        let got: Vec<_> = ranking.iter().map(|e| (e.identifier.as_str(), e.score)).collect();
        assert_eq!(got, vec![("F3", 1.0), ("F2", 0.5), ("F1", 0.0)]);
        assert_eq!(report.records[0].row, 2);
        assert_eq!(report.records[0].d_plus, 0.0);
    }

    #[test]
    fn test_records_follow_assembled_ranking() {
        let mut t = Table::new(vec!["FCIL_CDE".into(), "beds".into()]).unwrap();
        for (id, beds) in [("A", 5.0), ("B", 20.0), ("C", 5.0), ("D", 20.0)] {
            t.push_row(vec![Value::from(id), Value::Number(beds)]).unwrap();
        }
        let report = rank_detailed(&t, &[CriterionSpec::maximize("beds")], "FCIL_CDE").unwrap();

        let ids: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let scores: Vec<f64> = (0..4)
            .map(|row| report.records.iter().find(|r| r.row == row).unwrap().score)
            .collect();
        assert_eq!(report.ranking(), assemble_ranking(&ids, &scores).unwrap());

        let rows: Vec<_> = report.records.iter().map(|r| (r.row, r.d_minus)).collect();
        assert_eq!(rows, vec![(1, 1.0), (3, 1.0), (0, 0.0), (2, 0.0)]);
    }

    #[test]
    fn test_missing_identifier_column() {
        let err = rank(&facilities(), &[CriterionSpec::maximize("beds")], "SITE").unwrap_err();
        assert_eq!(err, RankError::UnknownColumn { column: "SITE".into() });
    }

    #[test]
    fn test_empty_selection() {
        assert_eq!(rank(&facilities(), &[], "FCIL_CDE").unwrap_err(), RankError::EmptySelection);
    }
}
