//! Conversions between linked sparse matrices and external formats
//!
//! `sprs` and `ndarray` index from 0, the linked matrix from 1.

use ndarray::Array2;
use num_traits::Num;
use sprs::CsMat;

use crate::error::Result;
use crate::matrix::SparseMatrix;

/// Converts a linked matrix to sprs CsMat in CSR storage
pub fn to_sprs_csr<T>(matrix: &SparseMatrix<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    let mut row_ptr = Vec::with_capacity(matrix.rows() + 1);
    let mut col_idx = Vec::new();
    let mut values = Vec::new();

    row_ptr.push(0);
    for i in 1..=matrix.rows() {
        for (j, &val) in matrix.row_iter(i) {
            col_idx.push(j - 1);
            values.push(val);
        }
        row_ptr.push(col_idx.len());
    }

    CsMat::new((matrix.rows(), matrix.cols()), row_ptr, col_idx, values)
}

/// Converts a sprs CsMat (either storage) to a linked matrix
///
/// Explicitly stored zeros are dropped.
pub fn from_sprs<T>(matrix: &CsMat<T>) -> Result<SparseMatrix<T>>
where
    T: Copy + Num + Default,
{
    let csr = matrix.to_csr();
    let (n_rows, n_cols) = csr.shape();

    let mut result = SparseMatrix::new(n_rows, n_cols)?;
    for (i, row) in csr.outer_iterator().enumerate() {
        result.append_row(i + 1, row.iter().map(|(j, &val)| (j + 1, val)));
    }
    Ok(result)
}

/// Materializes a linked matrix as a dense array
pub fn to_dense<T>(matrix: &SparseMatrix<T>) -> Array2<T>
where
    T: Copy + Num,
{
    let mut dense = Array2::zeros((matrix.rows(), matrix.cols()));
    for (i, j, val) in matrix.triplets() {
        dense[[i - 1, j - 1]] = val;
    }
    dense
}

/// Builds a linked matrix from the non-zero entries of a dense array
pub fn from_dense<T>(dense: &Array2<T>) -> Result<SparseMatrix<T>>
where
    T: Copy + Num,
{
    let (n_rows, n_cols) = dense.dim();
    let mut result = SparseMatrix::new(n_rows, n_cols)?;
    for (i, row) in dense.outer_iter().enumerate() {
        result.append_row(
            i + 1,
            row.iter().enumerate().map(|(j, &val)| (j + 1, val)),
        );
    }
    Ok(result)
}
