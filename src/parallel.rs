//! # Parallel multiplication
//!
//! Output row `i` of `A × B` depends only on row `i` of A, so the occupied
//! rows of A are computed independently on a Rayon thread pool and merged
//! afterwards.
//! Rows are disjoint, so no locking is needed and the result is identical
//! to [`crate::multiply`].

use std::collections::HashMap;

use log::{debug, warn};
use rayon::prelude::*;

use crate::error::{MatrixError, Result};
use crate::matrix::arithmetic::{check_multiply_dimensions, multiply, ProductSum};
use crate::matrix::row_index::RowIndex;
use crate::matrix::{SparseMatrix, Value};

/// Computes `a × b` with rows of `a` processed on `n_threads` threads
///
/// Falls back to the sequential algorithm if the thread pool cannot be
/// created.
///
/// # Examples
///
/// ```
/// use sparsemat::{multiply_parallel, SparseMatrix};
///
/// let a = SparseMatrix::from_entries(2, 2, [(0, 0, 1), (1, 1, 1)]).unwrap();
/// let b = SparseMatrix::from_entries(2, 2, [(0, 0, 2), (1, 1, 2)]).unwrap();
///
/// let c = multiply_parallel(&a, &b, 2).unwrap();
/// assert_eq!(c.get(1, 1).unwrap(), 2);
/// ```
pub fn multiply_parallel(a: &SparseMatrix, b: &SparseMatrix, n_threads: usize) -> Result<SparseMatrix> {
    check_multiply_dimensions(a, b)?;

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(n_threads).build() {
        Ok(pool) => pool,
        Err(err) => {
            warn!("could not build a {}-thread pool ({}), multiplying sequentially", n_threads, err);
            return multiply(a, b);
        }
    };

    let a_rows = RowIndex::build(a);
    let b_rows = RowIndex::build(b);

    let row_results: Vec<(usize, Vec<(usize, Value)>)> = pool.install(|| {
        a_rows
            .rows
            .par_iter()
            .map(|&i| multiply_row(i, &a_rows, &b_rows).map(|row| (i, row)))
            .collect::<Result<Vec<_>>>()
    })?;

    let nnz = row_results.iter().map(|(_, row)| row.len()).sum();
    let mut result = SparseMatrix::with_capacity(a.n_rows(), b.n_cols(), nnz)?;
    for (i, row) in row_results {
        for (k, value) in row {
            result.set(i, k, value)?;
        }
    }

    debug!(
        "parallel multiplication on {} threads: {} non-zeros",
        pool.current_num_threads(),
        result.nnz()
    );
    Ok(result)
}

/// Computes the non-zero `(col, value)` pairs of output row `i`
fn multiply_row(i: usize, a_rows: &RowIndex, b_rows: &RowIndex) -> Result<Vec<(usize, Value)>> {
    let mut accum: HashMap<usize, ProductSum> = HashMap::new();

    for (j, a_val) in a_rows.row(i) {
        for (k, b_val) in b_rows.row(j) {
            accum.entry(k).or_default().add_product(a_val, b_val);
        }
    }

    accum
        .into_iter()
        .filter_map(|(k, sum)| match sum.value() {
            Some(0) => None,
            Some(value) => Some(Ok((k, value))),
            None => Some(Err(MatrixError::Overflow { row: i, col: k })),
        })
        .collect()
}
