//! Named rectangular grid of values.

use crate::error::SignalError;

/// A named `rows x cols` grid of `f64`, stored row-major.
///
/// Either dimension may be zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    name: String,
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a matrix from row-major `data`.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::MatrixShape`] if `data.len() != rows * cols`.
    pub fn new(
        name: impl Into<String>,
        rows: usize,
        cols: usize,
        data: Vec<f64>,
    ) -> Result<Self, SignalError> {
        let name = name.into();
        let expected = rows.checked_mul(cols).ok_or_else(|| SignalError::MatrixShape {
            name: name.clone(),
            rows,
            cols,
            expected: usize::MAX,
            got: data.len(),
        })?;
        if data.len() != expected {
            return Err(SignalError::MatrixShape {
                name,
                rows,
                cols,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            name,
            rows,
            cols,
            data,
        })
    }

    /// Creates a matrix from a slice of rows. All rows must share one length.
    ///
    /// An empty slice yields a `0 x 0` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::MatrixShape`] for ragged rows.
    pub fn from_rows(name: impl Into<String>, rows: &[Vec<f64>]) -> Result<Self, SignalError> {
        let cols = rows.first().map_or(0, Vec::len);
        let data: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::new(name, rows.len(), cols, data)
    }

    /// Creates a matrix whose columns are the given slices.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::MatrixShape`] if the columns differ in length.
    pub fn from_columns(name: impl Into<String>, columns: &[&[f64]]) -> Result<Self, SignalError> {
        let name = name.into();
        let cols = columns.len();
        let rows = columns.first().map_or(0, |c| c.len());

        if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
            return Err(SignalError::MatrixShape {
                name,
                rows,
                cols,
                expected: rows * cols,
                got: rows * (cols - 1) + bad.len(),
            });
        }

        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            data.extend(columns.iter().map(|c| c[r]));
        }
        Self::new(name, rows, cols, data)
    }

    /// Returns the matrix name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the row-major backing data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns the element at (`row`, `col`), or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Returns row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows`.
    pub fn row(&self, r: usize) -> &[f64] {
        assert!(r < self.rows, "row {r} out of range for {} rows", self.rows);
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Iterates over the rows in order. Yields `rows` slices even when
    /// `cols == 0`.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |r| &self.data[r * self.cols..(r + 1) * self.cols])
    }

    /// Copies column `c` out of the matrix.
    ///
    /// # Panics
    ///
    /// Panics if `c >= cols`.
    pub fn column(&self, c: usize) -> Vec<f64> {
        assert!(c < self.cols, "column {c} out of range for {} columns", self.cols);
        self.iter_rows().map(|row| row[c]).collect()
    }

    /// Returns a copy of this matrix under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: self.rows,
            cols: self.cols,
            data: self.data.clone(),
        }
    }
}
