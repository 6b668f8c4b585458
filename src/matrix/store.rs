//! Coordinate-keyed storage of non-zero values

use std::collections::HashMap;

use crate::error::{report_i64, MatrixError, Result};
use crate::matrix::{Entry, Value};

/// Bounded map from `(row, col)` to a non-zero value
///
/// Absent coordinates read as zero and writing zero removes the entry, so
/// a stored value is never zero. Iteration order is unspecified; use
/// [`SparseStore::sorted_entries`] for canonical row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseStore {
    n_rows: usize,
    n_cols: usize,
    entries: HashMap<(usize, usize), Value>,
}

impl SparseStore {
    /// Creates an empty store accepting coordinates below `(n_rows, n_cols)`
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            entries: HashMap::new(),
        }
    }

    pub fn with_capacity(n_rows: usize, n_cols: usize, capacity: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Fails with `OutOfBounds` unless `row < n_rows` and `col < n_cols`
    pub fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row < self.n_rows && col < self.n_cols {
            Ok(())
        } else {
            Err(MatrixError::OutOfBounds {
                row: report_i64(row),
                col: report_i64(col),
                rows: self.n_rows,
                cols: self.n_cols,
            })
        }
    }

    /// Returns the stored value, or 0 if the coordinate is empty
    pub fn get(&self, row: usize, col: usize) -> Result<Value> {
        self.check_bounds(row, col)?;
        Ok(self.entries.get(&(row, col)).copied().unwrap_or(0))
    }

    /// Inserts or overwrites a value; zero removes the entry
    pub fn set(&mut self, row: usize, col: usize, value: Value) -> Result<()> {
        self.check_bounds(row, col)?;
        if value == 0 {
            self.entries.remove(&(row, col));
        } else {
            self.entries.insert((row, col), value);
        }
        Ok(())
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = Entry> + '_ {
        self.entries
            .iter()
            .map(|(&(row, col), &value)| Entry { row, col, value })
    }

    /// Entries sorted by row, then column
    pub fn sorted_entries(&self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self.iter().collect();
        entries.sort_unstable_by_key(|e| (e.row, e.col));
        entries
    }
}
