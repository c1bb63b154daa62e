//! Addition and multiplication of linked sparse matrices
//!
//! Both kernels build the result one row at a time in column order and
//! append it to an empty row ring, so no lookup into the result is needed.
//! Exact zero results are never stored.

use num_traits::Num;
use std::iter::Peekable;
use std::ops::AddAssign;
use tracing::debug;

use crate::accumulator::{create_accumulator, multiply_row};
use crate::error::{MatrixError, Result};
use crate::matrix::config::ArithmeticConfig;
use crate::matrix::linked::RowIter;
use crate::matrix::SparseMatrix;

/// Computes `C = A + B`
///
/// # Errors
///
/// Returns [`MatrixError::DimensionMismatch`] unless both operands have the
/// same shape. Nothing is allocated in that case.
pub fn sum<T>(a: &SparseMatrix<T>, b: &SparseMatrix<T>) -> Result<SparseMatrix<T>>
where
    T: Copy + Num,
{
    if a.dimensions() != b.dimensions() {
        return Err(MatrixError::DimensionMismatch {
            op: "sum",
            left: a.dimensions(),
            right: b.dimensions(),
        });
    }

    let mut c = SparseMatrix::new(a.rows(), a.cols())?;
    for i in 1..=a.rows() {
        let merged = MergeRows {
            left: a.row_iter(i).peekable(),
            right: b.row_iter(i).peekable(),
        };
        c.append_row(i, merged);
    }

    debug!(
        rows = c.rows(),
        cols = c.cols(),
        nnz = c.count_non_zero(),
        "computed sparse sum"
    );
    Ok(c)
}

/// Computes `C = A × B` with the default [`ArithmeticConfig`]
///
/// # Errors
///
/// Returns [`MatrixError::DimensionMismatch`] if `a.cols() != b.rows()`.
pub fn multiply<T>(a: &SparseMatrix<T>, b: &SparseMatrix<T>) -> Result<SparseMatrix<T>>
where
    T: Copy + Num + AddAssign + 'static,
{
    multiply_with_config(a, b, &ArithmeticConfig::default())
}

/// Computes `C = A × B`, choosing the row accumulator from `config`
///
/// `C(i, j)` is the sum over `k` of `A(i, k) · B(k, j)`; the sum is formed
/// in full before it is stored, so partial sums that pass through zero do
/// not affect the result.
pub fn multiply_with_config<T>(
    a: &SparseMatrix<T>,
    b: &SparseMatrix<T>,
    config: &ArithmeticConfig,
) -> Result<SparseMatrix<T>>
where
    T: Copy + Num + AddAssign + 'static,
{
    if a.cols() != b.rows() {
        return Err(MatrixError::DimensionMismatch {
            op: "multiply",
            left: a.dimensions(),
            right: b.dimensions(),
        });
    }

    let mut c = SparseMatrix::new(a.rows(), b.cols())?;
    let mut accumulator = create_accumulator::<T>(b.cols(), config.dense_accum_threshold);

    for i in 1..=a.rows() {
        accumulator.reset();
        multiply_row(i, a, b, accumulator.as_mut());
        c.append_row(i, accumulator.drain_sorted());
    }

    debug!(
        rows = c.rows(),
        cols = c.cols(),
        nnz = c.count_non_zero(),
        dense = b.cols() <= config.dense_accum_threshold,
        "computed sparse product"
    );
    Ok(c)
}

/// Column-ordered merge of the same row of two matrices, summing matches
struct MergeRows<'a, T> {
    left: Peekable<RowIter<'a, T>>,
    right: Peekable<RowIter<'a, T>>,
}

impl<T> Iterator for MergeRows<'_, T>
where
    T: Copy + Num,
{
    type Item = (usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        match (self.left.peek(), self.right.peek()) {
            (Some(&(lc, _)), Some(&(rc, _))) if lc == rc => {
                let (_, &l) = self.left.next()?;
                let (_, &r) = self.right.next()?;
                Some((lc, l + r))
            }
            (Some(&(lc, _)), Some(&(rc, _))) if lc < rc => {
                self.left.next().map(|(j, &v)| (j, v))
            }
            (_, Some(_)) => self.right.next().map(|(j, &v)| (j, v)),
            (Some(_), None) => self.left.next().map(|(j, &v)| (j, v)),
            (None, None) => None,
        }
    }
}
