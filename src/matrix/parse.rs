//! Reader for the coordinate text format
//!
//! ```text
//! rows=<R>
//! cols=<C>
//! (<row>, <col>, <value>)
//! ...
//! ```
//!
//! Headers must start with the literal key; whitespace is allowed only at
//! the ends of the line and around `=`. Whitespace anywhere inside an entry
//! line is ignored. Blank lines after the two headers are skipped; entry lines may come in any order and a repeated
//! coordinate overwrites the earlier one.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use log::{debug, trace};

use crate::error::{MatrixError, Result};
use crate::matrix::config::BoundsPolicy;
use crate::matrix::{SparseMatrix, Value};

/// Parses a matrix from a line-oriented reader
///
/// On error nothing is returned but the error; a half-built matrix is
/// never observable.
///
/// # Errors
///
/// * `Format` for a malformed header or entry line
/// * `InvalidDimensions` for a non-positive row or column count
/// * `OutOfBounds` for an out-of-range coordinate under [`BoundsPolicy::Reject`]
/// * `Io` if the reader fails
pub fn parse_matrix<R: BufRead>(reader: R, policy: BoundsPolicy) -> Result<SparseMatrix> {
    let mut lines = reader.lines();

    let rows_line = lines.next().transpose()?.unwrap_or_default();
    let n_rows = parse_header(1, &rows_line, "rows")?;
    let cols_line = lines.next().transpose()?.unwrap_or_default();
    let n_cols = parse_header(2, &cols_line, "cols")?;

    if n_rows <= 0 || n_cols <= 0 {
        return Err(MatrixError::InvalidDimensions {
            rows: n_rows,
            cols: n_cols,
        });
    }
    let (n_rows, n_cols) = (n_rows as usize, n_cols as usize);
    let mut matrix = SparseMatrix::new(n_rows, n_cols)?;
    let mut discarded = 0usize;

    for (idx, line) in lines.enumerate() {
        let line = line?;
        let line_number = idx + 3;
        if line.trim().is_empty() {
            continue;
        }

        let (row, col, value) = parse_entry(line_number, &line)?;
        let in_bounds = row >= 0 && col >= 0 && (row as usize) < n_rows && (col as usize) < n_cols;
        if !in_bounds {
            match policy {
                BoundsPolicy::Reject => {
                    return Err(MatrixError::OutOfBounds {
                        row,
                        col,
                        rows: n_rows,
                        cols: n_cols,
                    })
                }
                BoundsPolicy::Discard => {
                    trace!("discarding ({}, {}) at line {}", row, col, line_number);
                    discarded += 1;
                    continue;
                }
            }
        }
        matrix.set(row as usize, col as usize, value)?;
    }

    debug!(
        "parsed {}x{} matrix with {} non-zeros ({} discarded)",
        n_rows,
        n_cols,
        matrix.nnz(),
        discarded
    );
    Ok(matrix)
}

/// Parses `<key>=<integer>`; the sign of the integer is checked by the caller
fn parse_header(line_number: usize, line: &str, key: &str) -> Result<i64> {
    let value = line
        .trim()
        .strip_prefix(key)
        .and_then(|rest| rest.trim_start().strip_prefix('='))
        .map(str::trim)
        .ok_or_else(|| MatrixError::format(line_number, line, format!("expected `{}=<integer>`", key)))?;

    value
        .parse::<i64>()
        .map_err(|_| MatrixError::format(line_number, line, format!("`{}` is not an integer", value)))
}

/// Parses `(<row>, <col>, <value>)`
fn parse_entry(line_number: usize, line: &str) -> Result<(i64, i64, Value)> {
    let compact: String = line.split_whitespace().collect();
    let inner = compact
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| MatrixError::format(line_number, line, "expected `(row, col, value)`"))?;

    let fields: Vec<&str> = inner.split(',').collect();
    if fields.len() != 3 {
        return Err(MatrixError::format(
            line_number,
            line,
            format!("expected 3 fields, found {}", fields.len()),
        ));
    }

    let mut numbers = [0i64; 3];
    for (slot, field) in numbers.iter_mut().zip(&fields) {
        *slot = field
            .parse::<i64>()
            .map_err(|_| MatrixError::format(line_number, line, format!("`{}` is not an integer", field)))?;
    }

    Ok((numbers[0], numbers[1], numbers[2]))
}

impl FromStr for SparseMatrix {
    type Err = MatrixError;

    /// Parses with the default [`BoundsPolicy::Reject`]
    fn from_str(s: &str) -> Result<Self> {
        parse_matrix(s.as_bytes(), BoundsPolicy::default())
    }
}

impl SparseMatrix {
    /// Reads a matrix from a file
    pub fn load<P: AsRef<Path>>(path: P, policy: BoundsPolicy) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| MatrixError::io(path, e))?;

        parse_matrix(BufReader::new(file), policy).map_err(|err| match err {
            MatrixError::Io { path: None, source } => MatrixError::io(path, source),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let matrix: SparseMatrix = "rows=3\ncols=4\n(0, 1, 5)\n(2, 3, -7)\n".parse().unwrap();
        assert_eq!(matrix.shape(), (3, 4));
        assert_eq!(matrix.nnz(), 2);
        assert_eq!(matrix.get(0, 1).unwrap(), 5);
        assert_eq!(matrix.get(2, 3).unwrap(), -7);
    }

    #[test]
    fn test_parse_ignores_whitespace_and_blank_lines() {
        let text = "rows = 2\r\n cols= 2 \r\n\r\n  ( 1 ,0,  9 )  \n\n\t(0,1,-2)";
        let matrix: SparseMatrix = text.parse().unwrap();
        assert_eq!(matrix.get(1, 0).unwrap(), 9);
        assert_eq!(matrix.get(0, 1).unwrap(), -2);
    }

    #[test]
    fn test_parse_zero_value_not_stored() {
        let matrix: SparseMatrix = "rows=2\ncols=2\n(0,0,0)\n(1,1,3)".parse().unwrap();
        assert_eq!(matrix.nnz(), 1);
    }

    #[test]
    fn test_parse_duplicates_last_wins() {
        let matrix: SparseMatrix = "rows=2\ncols=2\n(0,0,4)\n(0,0,8)".parse().unwrap();
        assert_eq!(matrix.get(0, 0).unwrap(), 8);

        // A later zero erases an earlier value
        let matrix: SparseMatrix = "rows=2\ncols=2\n(0,0,4)\n(0,0,0)".parse().unwrap();
        assert!(matrix.is_zero());
    }

    #[test]
    fn test_header_errors() {
        for text in [
            "",
            "cols=2\nrows=2",
            "rows=x\ncols=2",
            "rows=2",
            "rows:2\ncols=2",
            "rows=2\ncols=2.5",
            "r o w s=2\ncols=2",
            "rows=1 0\ncols=2",
            "r o w s = 1 0\nc ols=2\n",
            "rows=2\ncols=+ 2",
            "rowsx=2\ncols=2",
        ] {
            let err = text.parse::<SparseMatrix>().unwrap_err();
            assert!(err.is_format_error(), "{:?} gave {:?}", text, err);
        }
    }

    #[test]
    fn test_non_positive_dimensions() {
        for text in ["rows=0\ncols=2", "rows=2\ncols=-1"] {
            let err = text.parse::<SparseMatrix>().unwrap_err();
            assert!(err.is_dimension_error(), "{:?} gave {:?}", text, err);
        }
    }

    #[test]
    fn test_malformed_entry_names_line() {
        let err = "rows=3\ncols=3\n(0,0,1)\n(1,2)".parse::<SparseMatrix>().unwrap_err();
        match err {
            MatrixError::Format { line_number, line, .. } => {
                assert_eq!(line_number, 4);
                assert_eq!(line, "(1,2)");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_malformed_entries() {
        for entry in ["1,2,3", "(1,2,3", "1,2,3)", "(a,2,3)", "(1,2,3,4)", "(1,2,)", "(1, 2, 3.5)", "()"] {
            let text = format!("rows=3\ncols=3\n{}", entry);
            let err = text.parse::<SparseMatrix>().unwrap_err();
            assert!(err.is_format_error(), "{:?} gave {:?}", entry, err);
        }
    }

    #[test]
    fn test_out_of_bounds_reject() {
        for entry in ["(3,0,1)", "(0,3,1)", "(-1,0,1)"] {
            let text = format!("rows=3\ncols=3\n{}", entry);
            let err = text.parse::<SparseMatrix>().unwrap_err();
            assert!(err.is_bounds_error(), "{:?} gave {:?}", entry, err);
        }
    }

    #[test]
    fn test_out_of_bounds_discard() {
        let text = "rows=2\ncols=2\n(5,0,1)\n(0,-1,2)\n(1,1,3)";
        let matrix = parse_matrix(text.as_bytes(), BoundsPolicy::Discard).unwrap();
        assert_eq!(matrix.nnz(), 1);
        assert_eq!(matrix.get(1, 1).unwrap(), 3);
    }

    #[test]
    fn test_value_overflow_is_format_error() {
        let err = "rows=1\ncols=1\n(0,0,99999999999999999999)".parse::<SparseMatrix>().unwrap_err();
        assert!(err.is_format_error());
    }
}
