//! Error types for matrix operations and triplet import

use std::io;

use thiserror::Error;

/// Errors raised by the matrix engine and the arithmetic operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Rows or columns were zero at construction
    #[error("invalid dimensions {rows}x{cols}: rows and columns must be greater than zero")]
    InvalidDimension { rows: usize, cols: usize },

    /// The sentinel skeleton for these dimensions cannot be allocated
    #[error("dimensions {rows}x{cols} are too large to allocate")]
    CapacityOverflow { rows: usize, cols: usize },

    /// A 1-based index fell outside `[1, rows] x [1, cols]`
    #[error("index ({row}, {col}) out of range for a {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Operand shapes are incompatible for the requested operation
    #[error("incompatible dimensions for {op}: {left:?} and {right:?}")]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Errors raised while importing a matrix from triplet text
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("missing `rows cols` header")]
    MissingHeader,

    #[error("line {line}: invalid token `{token}`")]
    InvalidToken { line: usize, token: String },

    #[error("line {line}: incomplete `row col value` record")]
    IncompleteRecord { line: usize },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_offending_values() {
        let err = MatrixError::IndexOutOfRange {
            row: 0,
            col: 1,
            rows: 3,
            cols: 3,
        };
        assert_eq!(err.to_string(), "index (0, 1) out of range for a 3x3 matrix");

        let err = MatrixError::DimensionMismatch {
            op: "sum",
            left: (2, 3),
            right: (3, 2),
        };
        assert_eq!(
            err.to_string(),
            "incompatible dimensions for sum: (2, 3) and (3, 2)"
        );
    }

    #[test]
    fn test_import_wraps_matrix_error() {
        let err: ImportError = MatrixError::InvalidDimension { rows: 0, cols: 4 }.into();
        assert!(matches!(err, ImportError::Matrix(_)));
        assert!(err.to_string().starts_with("invalid dimensions 0x4"));
    }
}
