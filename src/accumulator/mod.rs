//! Row accumulators for sparse matrix multiplication
//!
//! Each output row of `C = A × B` is the merge of scaled rows of B. An
//! accumulator collects those partial products for one row and hands them
//! back merged and sorted by column, ready to be appended to the result.

pub mod dense;
pub mod sort;

use num_traits::Num;
use std::ops::AddAssign;

use crate::matrix::SparseMatrix;

/// Trait for accumulators that handle intermediate products of one output row
pub trait Accumulator<T>
where
    T: Copy + Num + AddAssign,
{
    /// Reset the accumulator to prepare for a new row
    fn reset(&mut self);

    /// Accumulate a single entry (1-based column and value)
    fn accumulate(&mut self, col: usize, val: T);

    /// Take the merged entries as `(col, value)` pairs sorted by column
    ///
    /// The accumulator is left reset. Entries whose sum is exactly zero are
    /// returned as well; the caller decides whether to store them.
    fn drain_sorted(&mut self) -> Vec<(usize, T)>;
}

/// Create an appropriate accumulator based on the output matrix columns
///
/// # Arguments
///
/// * `n_cols` - The number of columns in the output matrix
/// * `dense_threshold` - Widest output that still gets a dense accumulator
///
/// # Returns
///
/// A boxed dense accumulator when `n_cols <= dense_threshold`, otherwise a
/// boxed sort-based accumulator.
pub fn create_accumulator<T>(n_cols: usize, dense_threshold: usize) -> Box<dyn Accumulator<T>>
where
    T: Copy + Num + AddAssign + 'static,
{
    if n_cols <= dense_threshold {
        Box::new(dense::DenseAccumulator::new(n_cols))
    } else {
        let initial_capacity = std::cmp::min(n_cols / 10, 1024);
        Box::new(sort::SortAccumulator::new(initial_capacity))
    }
}

/// Feed every partial product of row `i` of `A × B` into `accumulator`
///
/// # Arguments
///
/// * `i` - 1-based row of `a` (and of the product)
/// * `a` - Left operand
/// * `b` - Right operand, with `b.rows() == a.cols()`
/// * `accumulator` - Receives `A(i, k) · B(k, j)` for every stored pair
///
/// Products that are exactly zero are not accumulated.
pub fn multiply_row<T>(
    i: usize,
    a: &SparseMatrix<T>,
    b: &SparseMatrix<T>,
    accumulator: &mut dyn Accumulator<T>,
) where
    T: Copy + Num + AddAssign,
{
    for (k, &a_val) in a.row_iter(i) {
        for (j, &b_val) in b.row_iter(k) {
            let product = a_val * b_val;
            if !product.is_zero() {
                accumulator.accumulate(j, product);
            }
        }
    }
}
