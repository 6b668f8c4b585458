//! Tests for loading, saving and the file-based engine entry point

use std::fs;

use sparsemat::{default_output_path, run_files, BoundsPolicy, EngineConfig, MatrixError, Operation, SparseMatrix};
use tempfile::tempdir;

const A: &str = "rows=2\ncols=2\n(0, 0, 1)\n(1, 1, 2)\n";
const B: &str = "rows=2\ncols=2\n(0, 0, 3)\n(0, 1, 4)\n";

#[test]
fn test_load_and_save_round_trip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("a.txt");
    fs::write(&input, "rows=3\ncols=3\n(2, 1, 4)\n(0, 2, -1)\n").unwrap();

    let matrix = SparseMatrix::load(&input, BoundsPolicy::Reject).unwrap();
    let output = dir.path().join("copy.txt");
    matrix.save(&output).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "rows=3\ncols=3\n(0, 2, -1)\n(2, 1, 4)\n"
    );
}

#[test]
fn test_save_creates_missing_directories() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("nested").join("deeper").join("result.txt");

    let matrix = SparseMatrix::identity(2).unwrap();
    matrix.save(&output).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "rows=2\ncols=2\n(0, 0, 1)\n(1, 1, 1)\n");
}

#[test]
fn test_load_missing_file_names_path() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    match SparseMatrix::load(&missing, BoundsPolicy::Reject) {
        Err(MatrixError::Io { path, .. }) => assert_eq!(path.as_deref(), Some(missing.as_path())),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_save_into_file_as_directory_fails() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let err = SparseMatrix::identity(1).unwrap().save(blocker.join("out.txt")).unwrap_err();
    assert!(err.is_io_error());
}

#[test]
fn test_run_files_default_output() {
    let dir = tempdir().unwrap();
    let a_path = dir.path().join("a.txt");
    let b_path = dir.path().join("b.txt");
    fs::write(&a_path, A).unwrap();
    fs::write(&b_path, B).unwrap();

    for op in Operation::ALL {
        let out = default_output_path(&a_path, op);
        run_files(op, &a_path, &b_path, &out, &EngineConfig::default()).unwrap();
        assert!(out.starts_with(dir.path().join("output")));
    }

    let output = dir.path().join("output");
    assert_eq!(
        fs::read_to_string(output.join("addition.txt")).unwrap(),
        "rows=2\ncols=2\n(0, 0, 4)\n(0, 1, 4)\n(1, 1, 2)\n"
    );
    assert_eq!(
        fs::read_to_string(output.join("subtraction.txt")).unwrap(),
        "rows=2\ncols=2\n(0, 0, -2)\n(0, 1, -4)\n(1, 1, 2)\n"
    );
    assert_eq!(
        fs::read_to_string(output.join("multiplication.txt")).unwrap(),
        "rows=2\ncols=2\n(0, 0, 3)\n(0, 1, 4)\n(1, 0, 6)\n(1, 1, 8)\n"
    );
}

#[test]
fn test_run_files_bounds_policy() {
    let dir = tempdir().unwrap();
    let a_path = dir.path().join("a.txt");
    let b_path = dir.path().join("b.txt");
    let out = dir.path().join("out.txt");
    fs::write(&a_path, "rows=2\ncols=2\n(0, 0, 1)\n(7, 7, 9)\n").unwrap();
    fs::write(&b_path, B).unwrap();

    let err = run_files(Operation::Add, &a_path, &b_path, &out, &EngineConfig::default()).unwrap_err();
    assert!(err.is_bounds_error());
    assert!(!out.exists());

    let lenient = EngineConfig::default().with_bounds_policy(BoundsPolicy::Discard);
    let result = run_files(Operation::Add, &a_path, &b_path, &out, &lenient).unwrap();
    assert_eq!(result.get(0, 0).unwrap(), 4);
    assert_eq!(result.nnz(), 2);
}

#[test]
fn test_malformed_line_reported_with_line_number() {
    let dir = tempdir().unwrap();
    let a_path = dir.path().join("a.txt");
    fs::write(&a_path, "rows=3\ncols=3\n(0,0,1)\n\n(1,2)\n").unwrap();

    match SparseMatrix::load(&a_path, BoundsPolicy::Reject) {
        Err(MatrixError::Format { line_number, line, .. }) => {
            assert_eq!(line_number, 5);
            assert_eq!(line, "(1,2)");
        }
        other => panic!("unexpected result {:?}", other),
    }
}
