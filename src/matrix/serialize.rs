//! Writer for the coordinate text format
//!
//! Output is canonical: headers, then one entry per line in ascending row,
//! then column order. Parsing the output and writing it again yields the
//! same bytes.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::{MatrixError, Result};
use crate::matrix::SparseMatrix;

/// Writes `matrix` to `writer` in canonical order
pub fn write_matrix<W: Write>(matrix: &SparseMatrix, mut writer: W) -> Result<()> {
    writeln!(writer, "rows={}", matrix.n_rows())?;
    writeln!(writer, "cols={}", matrix.n_cols())?;
    for e in matrix.entries() {
        writeln!(writer, "({}, {}, {})", e.row, e.col, e.value)?;
    }
    writer.flush()?;
    Ok(())
}

impl fmt::Display for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows={}", self.n_rows())?;
        writeln!(f, "cols={}", self.n_cols())?;
        for e in self.entries() {
            writeln!(f, "({}, {}, {})", e.row, e.col, e.value)?;
        }
        Ok(())
    }
}

impl SparseMatrix {
    /// Writes the matrix to `path`, creating missing parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("creating output directory {}", parent.display());
                fs::create_dir_all(parent).map_err(|e| MatrixError::io(parent, e))?;
            }
        }

        let file = File::create(path).map_err(|e| MatrixError::io(path, e))?;
        write_matrix(self, BufWriter::new(file)).map_err(|err| match err {
            MatrixError::Io { path: None, source } => MatrixError::io(path, source),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_canonical_order() {
        let matrix = SparseMatrix::from_entries(3, 3, [(2, 0, 5), (0, 2, -1), (0, 0, 3)]).unwrap();
        let mut out = Vec::new();
        write_matrix(&matrix, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "rows=3\ncols=3\n(0, 0, 3)\n(0, 2, -1)\n(2, 0, 5)\n"
        );
    }

    #[test]
    fn test_display_matches_writer() {
        let matrix = SparseMatrix::from_entries(2, 5, [(1, 4, 10), (0, 3, 2)]).unwrap();
        let mut out = Vec::new();
        write_matrix(&matrix, &mut out).unwrap();
        assert_eq!(matrix.to_string().into_bytes(), out);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = SparseMatrix::new(4, 1).unwrap();
        assert_eq!(matrix.to_string(), "rows=4\ncols=1\n");
    }

    #[test]
    fn test_round_trip() {
        let text = "rows=3\ncols=3\n(0, 1, 2)\n(1, 0, -4)\n(2, 2, 7)\n";
        let matrix: SparseMatrix = text.parse().unwrap();
        assert_eq!(matrix.to_string(), text);
    }
}
