//! Sparse integer matrix

use std::fmt;

use crate::error::{report_i64, MatrixError, Result};
use crate::matrix::store::SparseStore;

/// Element type of every matrix
pub type Value = i64;

/// A non-zero `(row, col, value)` triple viewed out of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry {
    pub row: usize,
    pub col: usize,
    pub value: Value,
}

/// A sparse matrix storing only its non-zero entries
///
/// Dimensions are fixed at construction and are always at least 1×1.
/// Arithmetic never mutates an operand; it builds a fresh result.
#[derive(Clone, PartialEq, Eq)]
pub struct SparseMatrix {
    n_rows: usize,
    n_cols: usize,
    store: SparseStore,
}

impl SparseMatrix {
    /// Creates an empty matrix
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` if either dimension is zero.
    pub fn new(n_rows: usize, n_cols: usize) -> Result<Self> {
        if n_rows == 0 || n_cols == 0 {
            return Err(MatrixError::InvalidDimensions {
                rows: report_i64(n_rows),
                cols: report_i64(n_cols),
            });
        }
        Ok(Self {
            n_rows,
            n_cols,
            store: SparseStore::new(n_rows, n_cols),
        })
    }

    /// Creates an empty matrix with room for `capacity` entries
    pub fn with_capacity(n_rows: usize, n_cols: usize, capacity: usize) -> Result<Self> {
        let mut matrix = Self::new(n_rows, n_cols)?;
        matrix.store = SparseStore::with_capacity(n_rows, n_cols, capacity);
        Ok(matrix)
    }

    /// Builds a matrix by setting each entry in turn; later duplicates win
    pub fn from_entries<I>(n_rows: usize, n_cols: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, Value)>,
    {
        let mut matrix = Self::new(n_rows, n_cols)?;
        for (row, col, value) in entries {
            matrix.set(row, col, value)?;
        }
        Ok(matrix)
    }

    /// Creates an n×n identity matrix
    pub fn identity(n: usize) -> Result<Self> {
        Self::from_entries(n, n, (0..n).map(|i| (i, i, 1)))
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.store.nnz()
    }

    pub fn is_zero(&self) -> bool {
        self.store.is_empty()
    }

    /// Reads a value; absent entries are zero
    pub fn get(&self, row: usize, col: usize) -> Result<Value> {
        self.store.get(row, col)
    }

    /// Writes a value; writing zero removes the entry
    pub fn set(&mut self, row: usize, col: usize, value: Value) -> Result<()> {
        self.store.set(row, col, value)
    }

    /// Entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = Entry> + '_ {
        self.store.iter()
    }

    /// Entries in canonical order (ascending row, then column)
    pub fn entries(&self) -> Vec<Entry> {
        self.store.sorted_entries()
    }
}

impl fmt::Debug for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        let max_entries = 10;
        let entries = self.entries();
        if !entries.is_empty() {
            writeln!(f, "  content sample:")?;
            for e in entries.iter().take(max_entries) {
                writeln!(f, "    ({}, {}) = {}", e.row, e.col, e.value)?;
            }
            if entries.len() > max_entries {
                writeln!(f, "    ... ({} more)", entries.len() - max_entries)?;
            }
        }

        write!(f, "}}")
    }
}
