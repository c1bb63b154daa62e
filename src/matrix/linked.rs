//! Sparse matrix stored as rings of linked nodes
//!
//! The skeleton is a master sentinel anchoring two rings: the row ring
//! (master -> row sentinel 1 -> ... -> row sentinel M -> master, via `down`)
//! and the column ring (master -> column sentinel 1 -> ... -> column
//! sentinel N -> master, via `right`). Each row sentinel owns a private ring
//! of element nodes, threaded through `right` in strictly ascending column
//! order and closing back on the sentinel.

use std::fmt;

use num_traits::Num;
use tracing::debug;

use crate::error::{MatrixError, Result};
use crate::matrix::node::{NodeArena, NodeId};

/// Arena slot of the master sentinel
const HEAD: NodeId = NodeId::new(0);

/// A sparse matrix backed by sentinel rings
///
/// Indices are 1-based: valid positions are `[1, n_rows] x [1, n_cols]`.
/// Exact zeros are never stored; inserting a zero is a no-op and does not
/// remove a value already present at that position.
#[derive(Clone)]
pub struct SparseMatrix<T = f64> {
    n_rows: usize,
    n_cols: usize,
    nodes: NodeArena<T>,
}

impl<T> SparseMatrix<T>
where
    T: Copy + Num,
{
    /// Creates an empty `n_rows x n_cols` matrix
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows, at least 1
    /// * `n_cols` - Number of columns, at least 1
    ///
    /// # Returns
    ///
    /// A matrix with no stored elements whose skeleton holds one sentinel
    /// per row and per column.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimension`] if either dimension is zero,
    /// and [`MatrixError::CapacityOverflow`] if the skeleton does not fit in
    /// memory.
    pub fn new(n_rows: usize, n_cols: usize) -> Result<Self> {
        if n_rows == 0 || n_cols == 0 {
            return Err(MatrixError::InvalidDimension {
                rows: n_rows,
                cols: n_cols,
            });
        }

        let overflow = MatrixError::CapacityOverflow {
            rows: n_rows,
            cols: n_cols,
        };
        let capacity = n_rows
            .checked_add(n_cols)
            .and_then(|sentinels| sentinels.checked_add(1))
            .filter(|&capacity| capacity <= isize::MAX as usize)
            .ok_or_else(|| overflow.clone())?;
        let mut nodes = NodeArena::try_with_capacity(capacity).map_err(|_| overflow)?;
        let head = nodes.alloc(-1, -1, T::zero());
        debug_assert_eq!(head, HEAD);

        // Row sentinels occupy slots 1..=n_rows, so row i is slot i
        let mut last = head;
        for i in 1..=n_rows {
            let sentinel = nodes.alloc(i as isize, 0, T::zero());
            nodes[last].down = sentinel;
            last = sentinel;
        }
        nodes[last].down = head;

        let mut last = head;
        for j in 1..=n_cols {
            let sentinel = nodes.alloc(0, j as isize, T::zero());
            nodes[last].right = sentinel;
            last = sentinel;
        }
        nodes[last].right = head;

        debug!(rows = n_rows, cols = n_cols, "built sentinel skeleton");

        Ok(Self {
            n_rows,
            n_cols,
            nodes,
        })
    }

    /// Creates an `n x n` identity matrix
    pub fn identity(n: usize) -> Result<Self> {
        let mut matrix = Self::new(n, n)?;
        for i in 1..=n {
            matrix.append_row(i, std::iter::once((i, T::one())));
        }
        Ok(matrix)
    }

    /// Builds a matrix from `(row, col, value)` triplets
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `triplets` - 1-based `(row, col, value)` entries in any order
    ///
    /// # Returns
    ///
    /// The populated matrix. Later triplets overwrite earlier ones at the
    /// same position; zero values are skipped.
    pub fn from_triplets<I>(n_rows: usize, n_cols: usize, triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut matrix = Self::new(n_rows, n_cols)?;
        for (i, j, value) in triplets {
            matrix.insert(i, j, value)?;
        }
        Ok(matrix)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.n_cols
    }

    /// Returns `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    fn check_index(&self, i: usize, j: usize) -> Result<()> {
        if i < 1 || i > self.n_rows || j < 1 || j > self.n_cols {
            return Err(MatrixError::IndexOutOfRange {
                row: i,
                col: j,
                rows: self.n_rows,
                cols: self.n_cols,
            });
        }
        Ok(())
    }

    fn row_sentinel(&self, i: usize) -> NodeId {
        debug_assert!(i >= 1 && i <= self.n_rows);
        NodeId::new(i)
    }

    /// Last node of the row ring whose column is below `j` (possibly the sentinel)
    fn seek(&self, sentinel: NodeId, j: usize) -> NodeId {
        let mut prev = sentinel;
        loop {
            let next = self.nodes[prev].right;
            if next == sentinel || self.nodes[next].col >= j as isize {
                return prev;
            }
            prev = next;
        }
    }

    /// Inserts or overwrites the value at `(i, j)`
    ///
    /// A zero `value` leaves the matrix untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] before touching any node if
    /// `(i, j)` is outside the matrix, even when `value` is zero.
    pub fn insert(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        self.check_index(i, j)?;
        if value.is_zero() {
            return Ok(());
        }

        let sentinel = self.row_sentinel(i);
        let prev = self.seek(sentinel, j);
        let next = self.nodes[prev].right;

        if next != sentinel && self.nodes[next].col == j as isize {
            self.nodes[next].value = value;
        } else {
            let id = self.nodes.alloc(i as isize, j as isize, value);
            self.nodes[id].right = next;
            self.nodes[prev].right = id;
        }
        Ok(())
    }

    /// Returns the value at `(i, j)`, or zero when nothing is stored there
    pub fn get(&self, i: usize, j: usize) -> Result<T> {
        self.check_index(i, j)?;

        let sentinel = self.row_sentinel(i);
        let next = self.nodes[self.seek(sentinel, j)].right;
        if next != sentinel && self.nodes[next].col == j as isize {
            Ok(self.nodes[next].value)
        } else {
            Ok(T::zero())
        }
    }

    /// Number of stored (non-zero) elements
    pub fn count_non_zero(&self) -> usize {
        self.row_sentinels()
            .map(|sentinel| self.ring(sentinel).count())
            .sum()
    }

    /// Removes every stored element, keeping dimensions and sentinels
    pub fn clear(&mut self) {
        let mut released = 0usize;
        for i in 1..=self.n_rows {
            let sentinel = self.row_sentinel(i);
            let mut current = self.nodes[sentinel].right;
            while current != sentinel {
                let next = self.nodes[current].right;
                self.nodes.release(current);
                released += 1;
                current = next;
            }
            self.nodes[sentinel].right = sentinel;
        }
        debug!(released, "cleared sparse matrix");
    }

    /// Returns an iterator over the stored elements of row `i`
    ///
    /// Each item is `(col, &value)`, in ascending column order.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in `[1, rows]`.
    pub fn row_iter(&self, i: usize) -> RowIter<'_, T> {
        assert!(i >= 1 && i <= self.n_rows, "Row index out of bounds");
        let sentinel = self.row_sentinel(i);
        RowIter {
            nodes: &self.nodes,
            sentinel,
            current: self.nodes[sentinel].right,
        }
    }

    /// Returns a lazy row-major iterator over `(row, col, value)` triplets
    ///
    /// Every call starts a fresh pass from the first row.
    pub fn triplets(&self) -> Triplets<'_, T> {
        let sentinel = self.nodes[HEAD].down;
        Triplets {
            nodes: &self.nodes,
            sentinel,
            current: self.nodes[sentinel].right,
        }
    }

    /// Appends column-ascending entries to an empty row without searching
    ///
    /// Used by the arithmetic kernels, which produce each output row in
    /// column order. Zero values are skipped.
    pub(crate) fn append_row<I>(&mut self, i: usize, entries: I)
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        let sentinel = self.row_sentinel(i);
        debug_assert_eq!(self.nodes[sentinel].right, sentinel, "row must be empty");

        let mut tail = sentinel;
        for (j, value) in entries {
            if value.is_zero() {
                continue;
            }
            debug_assert!(j >= 1 && j <= self.n_cols);
            debug_assert!(self.nodes[tail].col < j as isize);
            let id = self.nodes.alloc(i as isize, j as isize, value);
            self.nodes[id].right = sentinel;
            self.nodes[tail].right = id;
            tail = id;
        }
    }

    fn row_sentinels(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.nodes[HEAD].down;
        std::iter::from_fn(move || {
            if current == HEAD {
                return None;
            }
            let sentinel = current;
            current = self.nodes[current].down;
            Some(sentinel)
        })
    }

    fn column_sentinels(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.nodes[HEAD].right;
        std::iter::from_fn(move || {
            if current == HEAD {
                return None;
            }
            let sentinel = current;
            current = self.nodes[current].right;
            Some(sentinel)
        })
    }

    /// Element nodes of the ring owned by `sentinel`
    fn ring(&self, sentinel: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.nodes[sentinel].right;
        std::iter::from_fn(move || {
            if current == sentinel {
                return None;
            }
            let node = current;
            current = self.nodes[current].right;
            Some(node)
        })
    }

    /// Checks the structural invariants of every ring
    ///
    /// Both sentinel rings close on the master with the expected sentinels,
    /// every row ring closes on its sentinel with strictly ascending in-range
    /// columns and no stored zero, and no arena slot is unaccounted for.
    pub fn is_consistent(&self) -> bool {
        let live = self.nodes.live();
        let bounded = |n: usize| n <= live;

        let rows: Vec<NodeId> = self.row_sentinels().take(live + 1).collect();
        if rows.len() != self.n_rows {
            return false;
        }
        for (expected, &sentinel) in (1..).zip(&rows) {
            let node = &self.nodes[sentinel];
            if node.row != expected || node.col != 0 {
                return false;
            }
        }

        let cols: Vec<NodeId> = self.column_sentinels().take(live + 1).collect();
        if cols.len() != self.n_cols {
            return false;
        }
        for (expected, &sentinel) in (1..).zip(&cols) {
            let node = &self.nodes[sentinel];
            if node.row != 0 || node.col != expected {
                return false;
            }
        }

        let mut elements = 0usize;
        for &sentinel in &rows {
            let row = self.nodes[sentinel].row;
            let mut last_col = 0isize;
            for id in self.ring(sentinel).take(live + 1) {
                let node = &self.nodes[id];
                if node.row != row
                    || node.col <= last_col
                    || node.col > self.n_cols as isize
                    || node.value.is_zero()
                {
                    return false;
                }
                last_col = node.col;
                elements += 1;
                if !bounded(elements) {
                    return false;
                }
            }
        }

        1 + self.n_rows + self.n_cols + elements == live
    }
}

impl<T: Copy + Num> PartialEq for SparseMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions() && self.triplets().eq(other.triplets())
    }
}

/// Iterator over one row ring, see [`SparseMatrix::row_iter`]
pub struct RowIter<'a, T> {
    nodes: &'a NodeArena<T>,
    sentinel: NodeId,
    current: NodeId,
}

impl<'a, T> Iterator for RowIter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.sentinel {
            return None;
        }
        let nodes: &'a NodeArena<T> = self.nodes;
        let node = &nodes[self.current];
        self.current = node.right;
        Some((node.col as usize, &node.value))
    }
}

/// Row-major iterator over stored elements, see [`SparseMatrix::triplets`]
pub struct Triplets<'a, T> {
    nodes: &'a NodeArena<T>,
    sentinel: NodeId,
    current: NodeId,
}

impl<T: Copy> Iterator for Triplets<'_, T> {
    type Item = (usize, usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.sentinel == HEAD {
                return None;
            }
            if self.current == self.sentinel {
                self.sentinel = self.nodes[self.sentinel].down;
                self.current = self.nodes[self.sentinel].right;
                continue;
            }
            let node = &self.nodes[self.current];
            self.current = node.right;
            return Some((node.row as usize, node.col as usize, node.value));
        }
    }
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.count_non_zero())?;

        let max_rows_to_print = 5.min(self.n_rows);
        writeln!(f, "  content sample:")?;

        for i in 1..=max_rows_to_print {
            write!(f, "    row {}: ", i)?;
            let len = self.row_iter(i).count();

            if len == 0 {
                writeln!(f, "(empty)")?;
            } else {
                let max_elements = 5.min(len);

                for (j, value) in self.row_iter(i).take(max_elements) {
                    write!(f, "({}, {:?}) ", j, value)?;
                }

                if len > max_elements {
                    write!(f, "... ({} more)", len - max_elements)?;
                }

                writeln!(f)?;
            }
        }

        if self.n_rows > max_rows_to_print {
            writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
        }

        write!(f, "}}")
    }
}
