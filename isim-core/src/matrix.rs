//! Row-major fingerprint matrix view.
//!
//! `FpMatrix` borrows a flat f32 buffer of `n_rows × n_cols` entries and
//! hands out row slices and column aggregates. Entries are {0, 1} for
//! binary fingerprints; the operations in [`crate::real`] accept arbitrary
//! real values. Aggregates are accumulated and returned in f64.

use crate::error::{Result, SimError};

/// Borrowed dense matrix of fingerprints, one row per object.
#[derive(Debug, Clone, Copy)]
pub struct FpMatrix<'a> {
    data: &'a [f32],
    n_rows: usize,
    n_cols: usize,
}

impl<'a> FpMatrix<'a> {
    /// Wrap a flat row-major buffer. The row count is inferred from the
    /// buffer length, which must be a whole number of rows.
    pub fn new(data: &'a [f32], n_cols: usize) -> Result<Self> {
        if n_cols == 0 {
            return Err(SimError::InvalidArgument(
                "matrix needs at least one column".into(),
            ));
        }
        if data.len() % n_cols != 0 {
            return Err(SimError::InvalidArgument(format!(
                "buffer of {} entries is not a whole number of {}-column rows",
                data.len(),
                n_cols
            )));
        }
        Ok(Self {
            data,
            n_rows: data.len() / n_cols,
            n_cols,
        })
    }

    /// Number of objects (rows).
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of features (columns).
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// True when the matrix holds no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Feature slice of row `i`. Panics if `i` is out of range.
    #[inline]
    pub fn row(&self, i: usize) -> &'a [f32] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// Column-wise sum over all rows.
    pub fn col_sum(&self) -> Vec<f64> {
        let mut sum = vec![0.0f64; self.n_cols];
        for i in 0..self.n_rows {
            for (acc, &v) in sum.iter_mut().zip(self.row(i)) {
                *acc += v as f64;
            }
        }
        sum
    }

    /// Column-wise sum of squared entries over all rows.
    pub fn col_sum_sq(&self) -> Vec<f64> {
        let mut sum = vec![0.0f64; self.n_cols];
        for i in 0..self.n_rows {
            for (acc, &v) in sum.iter_mut().zip(self.row(i)) {
                *acc += v as f64 * v as f64;
            }
        }
        sum
    }
}
