//! Shared fixtures for Entopsis tests: table builders, canonical scenarios
//! and seeded random tables.

use entopsis_common::{CriterionSpec, Direction, Table, Value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use pretty_assertions;

pub const ID_COLUMN: &str = "FCIL_CDE";

/// Column-wise table construction.
///
/// ```ignore
/// let t = TableBuilder::new(&["a", "b"]).numeric("beds", &[1.0, 2.0]).build();
/// ```
pub struct TableBuilder {
    ids: Vec<String>,
    columns: Vec<(String, Vec<Value>)>,
}

impl TableBuilder {
    pub fn new(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|s| s.to_string()).collect(),
            columns: Vec::new(),
        }
    }

    pub fn numeric(mut self, name: &str, values: &[f64]) -> Self {
        assert_eq!(values.len(), self.ids.len(), "column '{name}' length");
        self.columns.push((name.to_string(), values.iter().map(|&x| Value::Number(x)).collect()));
        self
    }

    /// Raw text cells, parsed the way a file loader would see them.
    pub fn raw(mut self, name: &str, values: &[&str]) -> Self {
        assert_eq!(values.len(), self.ids.len(), "column '{name}' length");
        self.columns.push((name.to_string(), values.iter().map(|s| Value::from_raw(s)).collect()));
        self
    }

    pub fn build(self) -> Table {
        let mut header = vec![ID_COLUMN.to_string()];
        header.extend(self.columns.iter().map(|(name, _)| name.clone()));
        let mut table = Table::new(header).expect("builder column names are unique");
        for (i, id) in self.ids.iter().enumerate() {
            let mut row = vec![Value::from(id.as_str())];
            row.extend(self.columns.iter().map(|(_, values)| values[i].clone()));
            table.push_row(row).expect("builder rows match header");
        }
        table
    }
}

/// Three facilities with beds 10, 20, 30.
pub fn three_record_example() -> Table {
    TableBuilder::new(&["F10", "F20", "F30"]).numeric("beds", &[10.0, 20.0, 30.0]).build()
}

/// `flat` is identical for every record.
pub fn constant_column_table() -> Table {
    TableBuilder::new(&["a", "b", "c", "d"])
        .numeric("flat", &[4.0, 4.0, 4.0, 4.0])
        .numeric("beds", &[1.0, 5.0, 2.0, 8.0])
        .build()
}

/// `spike` is constant except one low outlier; `ramp` rises steadily.
pub fn outlier_table() -> Table {
    TableBuilder::new(&["a", "b", "c", "d", "e"])
        .numeric("spike", &[50.0, 50.0, 50.0, 50.0, 5.0])
        .numeric("ramp", &[1.0, 2.0, 3.0, 4.0, 5.0])
        .build()
}

/// A random `records × criteria` table with random directions.
/// Every column is guaranteed to have a non-zero range.
pub fn random_table(seed: u64, records: usize, criteria: usize) -> (Table, Vec<CriterionSpec>) {
    assert!(records >= 2, "need at least two records");
    let mut rng = StdRng::seed_from_u64(seed);

    let ids: Vec<String> = (0..records).map(|i| format!("R{i:04}")).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let mut builder = TableBuilder::new(&id_refs);
    let mut specs = Vec::with_capacity(criteria);

    for j in 0..criteria {
        let scale = rng.gen_range(0.1..1000.0);
        let offset = rng.gen_range(-500.0..500.0);
        let mut values: Vec<f64> = (0..records).map(|_| offset + scale * rng.gen::<f64>()).collect();
        if values.iter().all(|&v| v == values[0]) {
            values[1] += 1.0;
        }
        let name = format!("c{j}");
        builder = builder.numeric(&name, &values);
        let direction = if rng.gen_bool(0.5) { Direction::Maximize } else { Direction::Minimize };
        specs.push(CriterionSpec::new(name, direction));
    }

    (builder.build(), specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_header_order() {
        let t = outlier_table();
        assert_eq!(t.columns(), &[ID_COLUMN.to_string(), "spike".into(), "ramp".into()]);
        assert_eq!(t.len(), 5);
    }

    #[test]
    fn test_random_table_is_seeded() {
        let (a, specs_a) = random_table(7, 6, 3);
        let (b, specs_b) = random_table(7, 6, 3);
        assert_eq!(a, b);
        assert_eq!(specs_a, specs_b);
        assert_eq!(a.numeric_columns(), vec!["c0", "c1", "c2"]);
    }
}
