//! Validated row-stochastic transition probability matrices.

use serde::{Deserialize, Serialize};

use crate::errors::{CeError, ErrorInfo};

/// Maximum absolute deviation of a row sum from one accepted by [`Tpm`].
pub const ROW_SUM_TOLERANCE: f64 = 1e-8;

/// Square row-stochastic matrix describing one step of a discrete Markov system.
///
/// Entry `(i, j)` holds `P(next = j | current = i)`. Values are stored row-major
/// and never mutated after construction; every constructor validates shape,
/// finiteness, non-negativity and row sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Tpm {
    n: usize,
    data: Vec<f64>,
}

impl Tpm {
    /// Builds a matrix from nested rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, CeError> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(CeError::Tpm(
                    ErrorInfo::new("tpm-not-square", "every row must have one entry per state")
                        .with_context("row", idx)
                        .with_context("expected", n)
                        .with_context("found", row.len()),
                ));
            }
            data.extend(row);
        }
        Self::from_row_major(n, data)
    }

    /// Builds a matrix from a flat row-major buffer of length `n * n`.
    pub fn from_row_major(n: usize, data: Vec<f64>) -> Result<Self, CeError> {
        if n == 0 {
            return Err(CeError::Tpm(ErrorInfo::new(
                "tpm-empty",
                "a transition matrix requires at least one state",
            )));
        }
        if data.len() != n * n {
            return Err(CeError::Tpm(
                ErrorInfo::new("tpm-not-square", "buffer length must equal n * n")
                    .with_context("n", n)
                    .with_context("len", data.len()),
            ));
        }
        for (row_idx, row) in data.chunks_exact(n).enumerate() {
            let mut sum = 0.0;
            for (col_idx, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(CeError::Tpm(
                        ErrorInfo::new("tpm-non-finite", "entries must be finite")
                            .with_context("row", row_idx)
                            .with_context("col", col_idx),
                    ));
                }
                if value < 0.0 {
                    return Err(CeError::Tpm(
                        ErrorInfo::new("tpm-negative", "entries must be non-negative")
                            .with_context("row", row_idx)
                            .with_context("col", col_idx)
                            .with_context("value", value),
                    ));
                }
                sum += value;
            }
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(CeError::Tpm(
                    ErrorInfo::new("tpm-row-sum", "every row must sum to one")
                        .with_context("row", row_idx)
                        .with_context("sum", sum)
                        .with_hint("normalise rows before constructing the matrix"),
                ));
            }
        }
        Ok(Self { n, data })
    }

    /// Identity dynamics over `n` states.
    pub fn identity(n: usize) -> Result<Self, CeError> {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self::from_row_major(n, data)
    }

    /// Number of states.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Transition probability from state `i` to state `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "tpm index out of range");
        self.data[i * self.n + j]
    }

    /// Row `i` of the matrix.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Iterator over all rows in state order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.n)
    }

    /// Flat row-major view of the entries.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Largest absolute entry-wise difference to `other`, or `None` when shapes differ.
    pub fn max_abs_diff(&self, other: &Tpm) -> Option<f64> {
        if self.n != other.n {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }
}

impl TryFrom<Vec<Vec<f64>>> for Tpm {
    type Error = CeError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Tpm> for Vec<Vec<f64>> {
    fn from(tpm: Tpm) -> Self {
        tpm.rows().map(<[f64]>::to_vec).collect()
    }
}
