use std::fs;

use docbatch_engine::{ensure_output_dir, resolve_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("converted");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_never_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("report.pdf", b"first").unwrap();
    assert_eq!(first.file_name().unwrap(), "report.pdf");

    let second = writer.write("report.pdf", b"second").unwrap();
    let third = writer.write("report.pdf", b"third").unwrap();
    assert_eq!(second.file_name().unwrap(), "report-1.pdf");
    assert_eq!(third.file_name().unwrap(), "report-2.pdf");

    assert_eq!(fs::read(&first).unwrap(), b"first");
    assert_eq!(fs::read(&second).unwrap(), b"second");
    assert_eq!(fs::read(&third).unwrap(), b"third");
}

#[test]
fn relative_output_dir_resolves_to_absolute() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    let resolved = resolve_output_dir(&nested.join("..").join("b")).unwrap();
    assert!(resolved.is_absolute());
    assert_eq!(resolved, fs::canonicalize(&nested).unwrap());
}

#[test]
fn no_partial_file_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("report.pdf", b"data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("report.pdf").exists());
}
