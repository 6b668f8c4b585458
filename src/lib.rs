//! # sparsemat: sparse integer matrix algebra
//!
//! Reads matrices from a compact coordinate text format, stores only their
//! non-zero entries, and adds, subtracts or multiplies them.
//!
//! ## Overview
//!
//! - [`SparseStore`]: bounded map from `(row, col)` to a non-zero value;
//!   writing zero deletes the entry.
//! - [`SparseMatrix`]: dimensions plus a store, with parsing
//!   ([`parse_matrix`]) and canonical serialization ([`write_matrix`]).
//! - [`add`], [`subtract`], [`multiply`]: pure operations building a new
//!   matrix. Multiplication indexes the right operand by row
//!   ([`RowIndex`]) so only contributing products are visited;
//!   [`multiply_parallel`] spreads the rows over a thread pool.
//! - [`engine`]: operation dispatch between readers and a writer, used by
//!   the `sparsemat` binary.
//!
//! ## File format
//!
//! ```text
//! rows=3
//! cols=3
//! (0, 0, 5)
//! (1, 1, -3)
//! ```
//!
//! ## Usage
//!
//! ```
//! use sparsemat::SparseMatrix;
//!
//! let a: SparseMatrix = "rows=2\ncols=2\n(0, 0, 1)\n(1, 1, 2)".parse().unwrap();
//! let b: SparseMatrix = "rows=2\ncols=2\n(0, 0, 3)\n(0, 1, 4)".parse().unwrap();
//!
//! let c = a.multiply(&b).unwrap();
//! assert_eq!(
//!     c.to_string(),
//!     "rows=2\ncols=2\n(0, 0, 3)\n(0, 1, 4)\n(1, 0, 6)\n(1, 1, 8)\n"
//! );
//! ```

pub mod engine;
pub mod error;
pub mod matrix;
pub mod parallel;
pub mod utils;

// Re-export primary components
pub use engine::{default_output_path, run, run_files, Operation};
pub use error::{MatrixError, Result};
pub use matrix::{add, multiply, multiply_with, subtract};
pub use matrix::{parse_matrix, write_matrix};
pub use matrix::{BoundsPolicy, EngineConfig, Entry, RowIndex, SparseMatrix, SparseStore, Value};
pub use parallel::multiply_parallel;
pub use utils::{from_dense, from_sprs, to_dense, to_sprs_csr};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
