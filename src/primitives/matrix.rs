//! Matrix type for 2D numeric data.

use crate::error::{GiziError, Result};
use serde::{Deserialize, Serialize};

/// A 2D matrix stored in row-major order.
///
/// # Examples
///
/// ```
/// use gizi::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
///     .expect("data length matches rows * cols");
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "MatrixParts<T>",
    bound(deserialize = "T: Copy + Deserialize<'de>")
)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

/// Unchecked serialized form; deserialization goes through [`Matrix::from_vec`].
#[derive(Deserialize)]
struct MatrixParts<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> TryFrom<MatrixParts<T>> for Matrix<T> {
    type Error = GiziError;

    fn try_from(parts: MatrixParts<T>) -> Result<Self> {
        Self::from_vec(parts.rows, parts.cols, parts.data)
    }
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a vector of data.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(GiziError::dimension_mismatch(rows * cols, data.len()));
        }
        Ok(Self { data, rows, cols })
    }

    /// Creates a matrix by stacking equally sized rows.
    ///
    /// An empty slice yields a `0 x 0` matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows have different lengths.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GiziError::dimension_mismatch(cols, row.len()));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Returns true if the matrix has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns a row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if the row index is out of bounds.
    #[must_use]
    pub fn row(&self, row_idx: usize) -> &[T] {
        let start = row_idx * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Returns a mutable row slice.
    ///
    /// # Panics
    ///
    /// Panics if the row index is out of bounds.
    pub fn row_mut(&mut self, row_idx: usize) -> &mut [T] {
        let start = row_idx * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Iterates over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Returns a column as an owned vector.
    #[must_use]
    pub fn column(&self, col_idx: usize) -> Vec<T> {
        (0..self.rows)
            .map(|row| self.data[row * self.cols + col_idx])
            .collect()
    }

    /// Builds a new matrix from the rows at `indices`, in that order.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    #[must_use]
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &idx in indices {
            data.extend_from_slice(self.row(idx));
        }
        Self {
            data,
            rows: indices.len(),
            cols: self.cols,
        }
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Copy + Default> Matrix<T> {
    /// Creates a matrix filled with `T::default()` (zeros for numbers).
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::default(); rows * cols],
            rows,
            cols,
        }
    }
}

impl Matrix<usize> {
    /// Sum of a row.
    #[must_use]
    pub fn row_sum(&self, row: usize) -> usize {
        self.row(row).iter().sum()
    }

    /// Sum of a column.
    #[must_use]
    pub fn col_sum(&self, col: usize) -> usize {
        (0..self.rows).map(|r| self.get(r, col)).sum()
    }

    /// Sum of the main diagonal.
    #[must_use]
    pub fn trace(&self) -> usize {
        (0..self.rows.min(self.cols)).map(|i| self.get(i, i)).sum()
    }

    /// Sum of every entry.
    #[must_use]
    pub fn total(&self) -> usize {
        self.data.iter().sum()
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests_matrix_contract.rs"]
mod tests_matrix_contract;
