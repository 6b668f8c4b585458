//! Conversions between `SparseMatrix` and external matrix libraries

use ndarray::{Array2, ArrayView2};
use sprs::CsMat;

use crate::error::Result;
use crate::matrix::{SparseMatrix, Value};
use crate::utils::exclusive_scan;

/// Converts to a sprs matrix in CSR storage with sorted column indices
pub fn to_sprs_csr(matrix: &SparseMatrix) -> CsMat<Value> {
    let entries = matrix.entries();

    let mut row_counts = vec![0; matrix.n_rows()];
    for e in &entries {
        row_counts[e.row] += 1;
    }

    // Canonical order is already row-major, so the entries can be laid out
    // as they come.
    CsMat::new(
        matrix.shape(),
        exclusive_scan(&row_counts),
        entries.iter().map(|e| e.col).collect(),
        entries.iter().map(|e| e.value).collect(),
    )
}

/// Converts a sprs matrix in either storage order
///
/// Explicitly stored zeros are dropped.
pub fn from_sprs(matrix: CsMat<Value>) -> Result<SparseMatrix> {
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let mut result = SparseMatrix::with_capacity(n_rows, n_cols, matrix.nnz())?;
    for (row, vec) in matrix.outer_iterator().enumerate() {
        for (col, &value) in vec.iter() {
            result.set(row, col, value)?;
        }
    }
    Ok(result)
}

/// Expands to a dense array
pub fn to_dense(matrix: &SparseMatrix) -> Array2<Value> {
    let mut dense = Array2::zeros(matrix.shape());
    for e in matrix.iter() {
        dense[[e.row, e.col]] = e.value;
    }
    dense
}

/// Builds a sparse matrix from the non-zero cells of a dense array
pub fn from_dense(dense: ArrayView2<Value>) -> Result<SparseMatrix> {
    let (n_rows, n_cols) = dense.dim();
    let mut result = SparseMatrix::new(n_rows, n_cols)?;
    for ((row, col), &value) in dense.indexed_iter() {
        result.set(row, col, value)?;
    }
    Ok(result)
}
