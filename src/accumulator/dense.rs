//! Dense accumulator for sparse matrix multiplication
//!
//! Keeps one slot per output column, so it suits results whose rows are
//! narrow enough to fit a dense buffer comfortably in cache.

use num_traits::Num;
use std::ops::AddAssign;

use crate::accumulator::Accumulator;

/// Dense accumulator for a single row of sparse matrix multiplication
pub struct DenseAccumulator<T> {
    /// The dense accumulation array, indexed by `col - 1`
    values: Vec<T>,

    /// Flags to track which positions in the dense array are occupied
    occupied: Vec<bool>,

    /// Columns touched since the last reset, in first-touch order
    col_indices: Vec<usize>,
}

impl<T> DenseAccumulator<T>
where
    T: Copy + Num + AddAssign,
{
    /// Create a new dense accumulator
    ///
    /// # Arguments
    ///
    /// * `n_cols` - Number of columns in the output matrix; columns
    ///   `1..=n_cols` can be accumulated
    pub fn new(n_cols: usize) -> Self {
        Self {
            values: vec![T::zero(); n_cols],
            occupied: vec![false; n_cols],
            col_indices: Vec::new(),
        }
    }

    fn reset(&mut self) {
        // Only the touched slots need clearing
        for &col in &self.col_indices {
            self.occupied[col - 1] = false;
        }
        self.col_indices.clear();
    }

    fn accumulate(&mut self, col: usize, val: T) {
        let slot = col - 1;
        if !self.occupied[slot] {
            self.occupied[slot] = true;
            self.col_indices.push(col);
            self.values[slot] = val;
        } else {
            self.values[slot] += val;
        }
    }

    fn drain_sorted(&mut self) -> Vec<(usize, T)> {
        self.col_indices.sort_unstable();

        let entries = self
            .col_indices
            .iter()
            .map(|&col| (col, self.values[col - 1]))
            .collect();

        self.reset();
        entries
    }
}

impl<T> Accumulator<T> for DenseAccumulator<T>
where
    T: Copy + Num + AddAssign,
{
    fn reset(&mut self) {
        DenseAccumulator::reset(self)
    }

    fn accumulate(&mut self, col: usize, val: T) {
        DenseAccumulator::accumulate(self, col, val)
    }

    fn drain_sorted(&mut self) -> Vec<(usize, T)> {
        DenseAccumulator::drain_sorted(self)
    }
}
