//! Operation dispatch between sources and a destination
//!
//! This is the surface a front end (the bundled CLI or anything else)
//! drives: pick an [`Operation`], hand over two readable sources and one
//! writable destination, and get back the result or a typed error. Nothing
//! here prints or exits.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;

use crate::error::Result;
use crate::matrix::{self, parse_matrix, write_matrix, EngineConfig, SparseMatrix};

/// A binary matrix operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Add, Operation::Subtract, Operation::Multiply];

    /// Applies the operation to `a` and `b`
    pub fn apply(self, a: &SparseMatrix, b: &SparseMatrix, config: &EngineConfig) -> Result<SparseMatrix> {
        match self {
            Operation::Add => matrix::add(a, b),
            Operation::Subtract => matrix::subtract(a, b),
            Operation::Multiply => matrix::multiply_with(a, b, config),
        }
    }

    /// File name used when no output path is given
    pub fn default_output_name(self) -> &'static str {
        match self {
            Operation::Add => "addition.txt",
            Operation::Subtract => "subtraction.txt",
            Operation::Multiply => "multiplication.txt",
        }
    }

    /// Position in the interactive menu (1-based)
    pub fn menu_number(self) -> u8 {
        match self {
            Operation::Add => 1,
            Operation::Subtract => 2,
            Operation::Multiply => 3,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "addition",
            Operation::Subtract => "subtraction",
            Operation::Multiply => "multiplication",
        };
        f.write_str(name)
    }
}

/// Error returned when an operation name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation `{0}` (expected add, subtract, multiply or 1-3)")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "add" | "addition" => Ok(Operation::Add),
            "2" | "sub" | "subtract" | "subtraction" => Ok(Operation::Subtract),
            "3" | "mul" | "multiply" | "multiplication" => Ok(Operation::Multiply),
            _ => Err(UnknownOperation(s.to_string())),
        }
    }
}

/// Parses both sources, applies `op` and writes the result to `out`
///
/// The result is also returned so callers can inspect it.
pub fn run<RA, RB, W>(op: Operation, a: RA, b: RB, out: W, config: &EngineConfig) -> Result<SparseMatrix>
where
    RA: BufRead,
    RB: BufRead,
    W: Write,
{
    let a = parse_matrix(a, config.bounds_policy)?;
    let b = parse_matrix(b, config.bounds_policy)?;
    let result = op.apply(&a, &b, config)?;
    write_matrix(&result, out)?;
    Ok(result)
}

/// File-based variant of [`run`]; missing output directories are created
pub fn run_files<P, Q, R>(op: Operation, a_path: P, b_path: Q, out_path: R, config: &EngineConfig) -> Result<SparseMatrix>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let a = SparseMatrix::load(a_path.as_ref(), config.bounds_policy)?;
    let b = SparseMatrix::load(b_path.as_ref(), config.bounds_policy)?;
    let result = op.apply(&a, &b, config)?;
    result.save(out_path.as_ref())?;

    info!(
        "{} of {} and {} written to {}",
        op,
        a_path.as_ref().display(),
        b_path.as_ref().display(),
        out_path.as_ref().display()
    );
    Ok(result)
}

/// `<directory of first_input>/output/<operation file name>`
pub fn default_output_path<P: AsRef<Path>>(first_input: P, op: Operation) -> PathBuf {
    let dir = first_input.as_ref().parent().unwrap_or_else(|| Path::new(""));
    dir.join("output").join(op.default_output_name())
}
