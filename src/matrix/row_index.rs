//! Row-major index over a matrix's entries
//!
//! Multiplication needs, for a given row `j` of the right operand, every
//! `(col, value)` stored in that row. The index is laid out like a CSR
//! matrix restricted to occupied rows: `rows[p]` is the p-th non-empty row
//! and `row_ptr[p]..row_ptr[p + 1]` delimits it inside `col_idx` and
//! `values`. Rows without entries take no space, so the index costs
//! O(nnz) whatever the declared dimensions.

use crate::matrix::{SparseMatrix, Value};
use crate::utils::exclusive_scan;

/// Entries of a matrix grouped by row
#[derive(Debug, Clone)]
pub struct RowIndex {
    /// Occupied row numbers, ascending
    pub rows: Vec<usize>,

    /// Offsets into `col_idx`/`values` (size: rows.len() + 1)
    pub row_ptr: Vec<usize>,

    /// Column indices (size: nnz)
    pub col_idx: Vec<usize>,

    /// Non-zero values (size: nnz)
    pub values: Vec<Value>,
}

impl RowIndex {
    /// Builds the index from the matrix's entries in canonical order
    ///
    /// Columns within a row come out ascending.
    pub fn build(matrix: &SparseMatrix) -> Self {
        let entries = matrix.entries();

        let mut rows = Vec::new();
        let mut row_counts = Vec::new();
        for e in &entries {
            if rows.last() == Some(&e.row) {
                if let Some(count) = row_counts.last_mut() {
                    *count += 1;
                }
            } else {
                rows.push(e.row);
                row_counts.push(1);
            }
        }

        Self {
            rows,
            row_ptr: exclusive_scan(&row_counts),
            col_idx: entries.iter().map(|e| e.col).collect(),
            values: entries.iter().map(|e| e.value).collect(),
        }
    }

    /// Number of rows holding at least one entry
    pub fn n_occupied_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// `(col, value)` pairs stored in row `row`; empty if the row is not occupied
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, Value)> + '_ {
        let (start, end) = match self.rows.binary_search(&row) {
            Ok(pos) => (self.row_ptr[pos], self.row_ptr[pos + 1]),
            Err(_) => (0, 0),
        };

        self.col_idx[start..end]
            .iter()
            .copied()
            .zip(self.values[start..end].iter().copied())
    }

    /// Number of entries in row `row`
    pub fn row_len(&self, row: usize) -> usize {
        match self.rows.binary_search(&row) {
            Ok(pos) => self.row_ptr[pos + 1] - self.row_ptr[pos],
            Err(_) => 0,
        }
    }
}
