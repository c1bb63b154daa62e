//! The list of live matrices manipulated by the shell

use crate::matrix::SparseMatrix;
use crate::shell::ShellError;

/// Matrices addressed by their 0-based position
///
/// Positions are assigned in creation order and stay stable: there is no
/// per-matrix removal, only [`Registry::erase_all`], after which numbering
/// restarts at zero.
#[derive(Debug, Default)]
pub struct Registry {
    matrices: Vec<SparseMatrix<f64>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `matrix` and returns its index
    pub fn push(&mut self, matrix: SparseMatrix<f64>) -> usize {
        self.matrices.push(matrix);
        self.matrices.len() - 1
    }

    pub fn get(&self, index: usize) -> Result<&SparseMatrix<f64>, ShellError> {
        let len = self.matrices.len();
        self.matrices
            .get(index)
            .ok_or(ShellError::UnknownMatrix { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut SparseMatrix<f64>, ShellError> {
        let len = self.matrices.len();
        self.matrices
            .get_mut(index)
            .ok_or(ShellError::UnknownMatrix { index, len })
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    /// Drops every matrix and returns how many were removed
    pub fn erase_all(&mut self) -> usize {
        let removed = self.matrices.len();
        self.matrices.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_creation_order() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        assert_eq!(registry.push(SparseMatrix::new(1, 1).unwrap()), 0);
        assert_eq!(registry.push(SparseMatrix::new(2, 3).unwrap()), 1);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).unwrap().dimensions(), (2, 3));
        assert!(matches!(
            registry.get(2),
            Err(ShellError::UnknownMatrix { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_erase_all_restarts_numbering() {
        let mut registry = Registry::new();
        registry.push(SparseMatrix::new(1, 1).unwrap());
        registry.push(SparseMatrix::new(1, 1).unwrap());

        assert_eq!(registry.erase_all(), 2);
        assert!(registry.get(0).is_err());
        assert_eq!(registry.push(SparseMatrix::new(4, 4).unwrap()), 0);
    }
}
