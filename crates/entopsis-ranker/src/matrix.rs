//! Dense row-major `f64` matrix used by every pipeline stage.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![0.0; rows * cols] }
    }

    /// Build from column vectors.
    ///
    /// # Panics
    ///
    /// If the columns differ in length.
    pub fn from_columns(columns: &[Vec<f64>]) -> Self {
        let cols = columns.len();
        let rows = columns.first().map_or(0, Vec::len);
        assert!(
            columns.iter().all(|c| c.len() == rows),
            "all columns must have the same length"
        );
        let mut m = Self::zeros(rows, cols);
        for (j, column) in columns.iter().enumerate() {
            for (i, &x) in column.iter().enumerate() {
                m.set(i, j, x);
            }
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows).map(move |i| self.get(i, col))
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// (min, max) of a column. `None` for a matrix with no rows.
    pub fn column_range(&self, col: usize) -> Option<(f64, f64)> {
        let mut it = self.column(col);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x))))
    }

    /// Multiply every column by its factor.
    ///
    /// # Panics
    ///
    /// If `factors.len()` differs from the number of columns.
    pub fn scale_columns(&self, factors: &[f64]) -> Self {
        assert_eq!(factors.len(), self.cols, "one factor per column");
        let mut out = self.clone();
        for i in 0..self.rows {
            for (j, f) in factors.iter().enumerate() {
                out.set(i, j, self.get(i, j) * f);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_layout() {
        let m = Matrix::from_columns(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!((m.rows(), m.cols()), (3, 2));
        assert_eq!(m.row(1), &[2.0, 5.0]);
        assert_eq!(m.column(1).collect::<Vec<_>>(), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_column_range_and_scale() {
        let m = Matrix::from_columns(&[vec![3.0, -1.0, 2.0], vec![1.0, 1.0, 1.0]]);
        assert_eq!(m.column_range(0), Some((-1.0, 3.0)));
        let s = m.scale_columns(&[2.0, 0.5]);
        assert_eq!(s.row(0), &[6.0, 0.5]);
        assert_eq!(Matrix::zeros(0, 2).column_range(0), None);
    }
}
