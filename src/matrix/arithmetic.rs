//! Addition, subtraction and multiplication of sparse matrices
//!
//! Every operation borrows its operands and returns a new matrix. Results
//! never contain a stored zero: a coordinate whose sum, difference or
//! accumulated product is zero is simply absent.

use std::collections::HashMap;

use log::debug;

use crate::error::{MatrixError, Result};
use crate::matrix::config::EngineConfig;
use crate::matrix::row_index::RowIndex;
use crate::matrix::{SparseMatrix, Value};
use crate::parallel::multiply_parallel;

/// Computes `a + b`
///
/// # Errors
///
/// `DimensionMismatch` unless both operands have the same shape;
/// `Overflow` if a sum does not fit in an i64.
pub fn add(a: &SparseMatrix, b: &SparseMatrix) -> Result<SparseMatrix> {
    combine(a, b, "addition", Value::checked_add)
}

/// Computes `a - b`, with the same contract as [`add`]
pub fn subtract(a: &SparseMatrix, b: &SparseMatrix) -> Result<SparseMatrix> {
    combine(a, b, "subtraction", Value::checked_sub)
}

/// Element-wise combination over the union of both entry sets
fn combine(
    a: &SparseMatrix,
    b: &SparseMatrix,
    op: &'static str,
    f: fn(Value, Value) -> Option<Value>,
) -> Result<SparseMatrix> {
    if a.shape() != b.shape() {
        return Err(MatrixError::DimensionMismatch {
            op,
            left: a.shape(),
            right: b.shape(),
        });
    }

    let (n_rows, n_cols) = a.shape();
    let mut result = SparseMatrix::with_capacity(n_rows, n_cols, a.nnz() + b.nnz())?;

    // Coordinates only present in A combine with an implicit zero from B
    for e in a.iter() {
        let value = f(e.value, 0).ok_or(MatrixError::Overflow { row: e.row, col: e.col })?;
        result.set(e.row, e.col, value)?;
    }

    for e in b.iter() {
        let left = a.get(e.row, e.col)?;
        let value = f(left, e.value).ok_or(MatrixError::Overflow { row: e.row, col: e.col })?;
        result.set(e.row, e.col, value)?;
    }

    debug!(
        "{} of {}x{} matrices: {} + {} entries -> {}",
        op,
        n_rows,
        n_cols,
        a.nnz(),
        b.nnz(),
        result.nnz()
    );
    Ok(result)
}

/// Computes `a × b`
///
/// B's entries are first grouped by row ([`RowIndex`]); each non-zero
/// `a[i, j]` then visits only row `j` of B, so the work is proportional to
/// the number of contributing products rather than to
/// `a.n_rows() * a.n_cols() * b.n_cols()`.
///
/// Partial products are summed exactly ([`ProductSum`]) and range-checked
/// once per output coordinate, so the result does not depend on
/// accumulation order.
///
/// # Errors
///
/// `DimensionMismatch` unless `a.n_cols() == b.n_rows()`;
/// `Overflow` if an output value does not fit in an i64.
pub fn multiply(a: &SparseMatrix, b: &SparseMatrix) -> Result<SparseMatrix> {
    check_multiply_dimensions(a, b)?;

    let b_rows = RowIndex::build(b);
    let mut accum: HashMap<(usize, usize), ProductSum> = HashMap::new();

    for e in a.iter() {
        for (k, b_val) in b_rows.row(e.col) {
            accum.entry((e.row, k)).or_default().add_product(e.value, b_val);
        }
    }

    let mut result = SparseMatrix::with_capacity(a.n_rows(), b.n_cols(), accum.len())?;
    for ((row, col), sum) in accum {
        let value = sum.value().ok_or(MatrixError::Overflow { row, col })?;
        result.set(row, col, value)?;
    }

    debug!(
        "multiplication of {}x{} by {}x{}: {} non-zeros",
        a.n_rows(),
        a.n_cols(),
        b.n_rows(),
        b.n_cols(),
        result.nnz()
    );
    Ok(result)
}

/// Exact running sum of i64 × i64 products
///
/// Each product fits in an i128. The sum is kept as a wrapping i128 plus a
/// count of signed wrap-arounds, so it is exact for any number of terms
/// and any order of addition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ProductSum {
    low: i128,
    wraps: i64,
}

impl ProductSum {
    pub(crate) fn add_product(&mut self, x: Value, y: Value) {
        let product = x as i128 * y as i128;
        let (low, wrapped) = self.low.overflowing_add(product);
        self.low = low;
        if wrapped {
            self.wraps += if product > 0 { 1 } else { -1 };
        }
    }

    /// The sum as an i64, or `None` if it is out of range
    pub(crate) fn value(self) -> Option<Value> {
        if self.wraps != 0 {
            return None;
        }
        Value::try_from(self.low).ok()
    }
}

/// Multiplies sequentially or on a thread pool as configured
pub fn multiply_with(a: &SparseMatrix, b: &SparseMatrix, config: &EngineConfig) -> Result<SparseMatrix> {
    if config.parallel_multiply {
        multiply_parallel(a, b, config.n_threads)
    } else {
        multiply(a, b)
    }
}

pub(crate) fn check_multiply_dimensions(a: &SparseMatrix, b: &SparseMatrix) -> Result<()> {
    if a.n_cols() != b.n_rows() {
        return Err(MatrixError::DimensionMismatch {
            op: "multiplication",
            left: a.shape(),
            right: b.shape(),
        });
    }
    Ok(())
}

impl SparseMatrix {
    /// See [`add`]
    pub fn add(&self, other: &SparseMatrix) -> Result<SparseMatrix> {
        add(self, other)
    }

    /// See [`subtract`]
    pub fn subtract(&self, other: &SparseMatrix) -> Result<SparseMatrix> {
        subtract(self, other)
    }

    /// See [`multiply`]
    pub fn multiply(&self, other: &SparseMatrix) -> Result<SparseMatrix> {
        multiply(self, other)
    }
}
