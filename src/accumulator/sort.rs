//! Sort-based accumulator for sparse matrix multiplication
//!
//! Collects partial products unsorted, then sorts and merges duplicates.
//! Memory grows with the number of products rather than the output width,
//! which makes it the better fit for very wide results.

use num_traits::Num;
use std::ops::AddAssign;

use crate::accumulator::Accumulator;

/// Sort-based accumulator for a single row of sparse matrix multiplication
pub struct SortAccumulator<T> {
    /// Partial products in arrival order
    entries: Vec<(usize, T)>,
}

impl<T> SortAccumulator<T>
where
    T: Copy + Num + AddAssign,
{
    /// Create a new sort-based accumulator with room for `initial_capacity` products
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(initial_capacity),
        }
    }

    fn reset(&mut self) {
        self.entries.clear();
    }

    fn accumulate(&mut self, col: usize, val: T) {
        self.entries.push((col, val));
    }

    fn drain_sorted(&mut self) -> Vec<(usize, T)> {
        // Stable sort keeps arrival order within a column, so sums are
        // formed in the same order as the dense accumulator forms them
        self.entries.sort_by_key(|&(col, _)| col);

        let mut merged: Vec<(usize, T)> = Vec::with_capacity(self.entries.len());
        for &(col, val) in &self.entries {
            match merged.last_mut() {
                Some((last_col, last_val)) if *last_col == col => *last_val += val,
                _ => merged.push((col, val)),
            }
        }

        self.reset();
        merged
    }
}

impl<T> Accumulator<T> for SortAccumulator<T>
where
    T: Copy + Num + AddAssign,
{
    fn reset(&mut self) {
        SortAccumulator::reset(self)
    }

    fn accumulate(&mut self, col: usize, val: T) {
        SortAccumulator::accumulate(self, col, val)
    }

    fn drain_sorted(&mut self) -> Vec<(usize, T)> {
        SortAccumulator::drain_sorted(self)
    }
}
