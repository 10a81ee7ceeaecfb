//! In-memory tabular input.
//!
//! A [`Table`] is an ordered list of records keyed by column name. Cells keep
//! whatever the loader saw; numeric coercion happens explicitly when the
//! ranker builds its decision matrix, never implicitly here.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{EntopsisError, Result};

/// A single cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    Empty,
}

impl Value {
    /// Parse a raw text cell. Blank (whitespace-only) cells become `Empty`.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Value::Empty
        } else {
            Value::Text(raw.to_string())
        }
    }

    /// Coerce to a finite `f64`.
    ///
    /// Returns `None` for empty cells, text that does not parse as a number,
    /// and NaN or infinite values.
    pub fn as_f64(&self) -> Option<f64> {
        let x = match self {
            Value::Number(x) => *x,
            Value::Text(s) => s.trim().parse::<f64>().ok()?,
            Value::Empty => return None,
        };
        x.is_finite().then_some(x)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral numbers print without a trailing ".0" so numeric ids stay readable.
            Value::Number(x) if x.fract() == 0.0 && x.abs() < 1e15 => write!(f, "{}", *x as i64),
            Value::Number(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
            Value::Empty => Ok(()),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

pub type Record = HashMap<String, Value>;

/// Ordered records plus the ordered header they were read with.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    /// Empty table with the given header. Column names must be non-blank
    /// and unique, since records are keyed by name.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (i, column) in columns.iter().enumerate() {
            if column.trim().is_empty() {
                return Err(EntopsisError::Table(format!("header column {i} has no name")));
            }
            if !seen.insert(column.as_str()) {
                return Err(EntopsisError::Table(format!("duplicate header column '{column}'")));
            }
        }
        Ok(Self { columns, records: Vec::new() })
    }

    /// Append a row given positionally, in header order.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(EntopsisError::Table(format!(
                "row {} has {} cells, header has {}",
                self.records.len(),
                values.len(),
                self.columns.len()
            )));
        }
        let record = self.columns.iter().cloned().zip(values).collect();
        self.records.push(record);
        Ok(())
    }

    /// Append a record keyed by column name. Columns the header does not
    /// know about are rejected; missing ones read back as `Value::Empty`.
    pub fn push_record(&mut self, record: Record) -> Result<()> {
        if let Some(unknown) = record.keys().find(|k| !self.has_column(k)) {
            return Err(EntopsisError::Table(format!(
                "record {} has unknown column '{}'",
                self.records.len(),
                unknown
            )));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Cell at (`row`, `column`). A record without the column yields `Empty`.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        const EMPTY: &Value = &Value::Empty;
        let record = self.records.get(row)?;
        if !self.has_column(column) {
            return None;
        }
        Some(record.get(column).unwrap_or(EMPTY))
    }

    /// A column is numeric when it has at least one non-empty cell and every
    /// non-empty cell coerces to a finite number.
    pub fn is_numeric_column(&self, column: &str) -> bool {
        if !self.has_column(column) {
            return false;
        }
        let mut seen = false;
        for row in 0..self.len() {
            match self.get(row, column) {
                Some(v) if v.is_empty() => continue,
                Some(v) if v.as_f64().is_some() => seen = true,
                _ => return false,
            }
        }
        seen
    }

    /// Header columns that can be offered as criteria, in header order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| self.is_numeric_column(c))
            .map(String::as_str)
            .collect()
    }
}
