//! Error types for parsing, arithmetic and I/O

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Every failure the engine can report.
///
/// Errors are raised at the point of violation and never recovered from
/// inside the crate; presenting them is left to the caller.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// A header or entry line does not follow the text format
    #[error("wrong format at line {line_number}: {reason} ({line:?})")]
    Format {
        /// 1-based line number in the source
        line_number: usize,
        /// Raw text of the offending line, empty if the line is missing
        line: String,
        reason: String,
    },

    /// Declared dimensions are not positive
    #[error("invalid matrix dimensions {rows}x{cols}")]
    InvalidDimensions { rows: i64, cols: i64 },

    /// Operands have incompatible shapes for the requested operation
    #[error(
        "matrix dimensions do not match for {op}: {}x{} and {}x{}",
        .left.0, .left.1, .right.0, .right.1
    )]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A coordinate lies outside the declared dimensions
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    OutOfBounds {
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },

    /// An accumulated value does not fit in an i64
    #[error("integer overflow at ({row}, {col})")]
    Overflow { row: usize, col: usize },

    /// Reading a source or writing a destination failed
    #[error("{}: {source}", display_path(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "<stream>".to_string(),
    }
}

/// Converts a coordinate or dimension for error reporting, saturating at `i64::MAX`
pub(crate) fn report_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl MatrixError {
    pub(crate) fn format(line_number: usize, line: &str, reason: impl Into<String>) -> Self {
        MatrixError::Format {
            line_number,
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MatrixError::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// True for malformed text input
    pub fn is_format_error(&self) -> bool {
        matches!(self, MatrixError::Format { .. })
    }

    /// True for invalid declared dimensions and shape mismatches
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            MatrixError::InvalidDimensions { .. } | MatrixError::DimensionMismatch { .. }
        )
    }

    pub fn is_bounds_error(&self) -> bool {
        matches!(self, MatrixError::OutOfBounds { .. })
    }

    pub fn is_io_error(&self) -> bool {
        matches!(self, MatrixError::Io { .. })
    }
}

impl From<io::Error> for MatrixError {
    fn from(source: io::Error) -> Self {
        MatrixError::Io { path: None, source }
    }
}
