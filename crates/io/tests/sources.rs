//! Integration tests for the file-backed source readers.

use std::path::{Path, PathBuf};

use approx::assert_abs_diff_eq;
use simtab_io::{IoError, SourceData, SourceFormat, SourceReader, open_source};
use simtab_signal::Signal;

fn names(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn signals(data: SourceData) -> Vec<Signal> {
    match data {
        SourceData::Signals(s) => s,
        SourceData::Matrices(_) => panic!("expected signals"),
    }
}

fn write(dir: &tempfile::TempDir, file: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(file);
    std::fs::write(&path, bytes).unwrap();
    path
}

const EPLUS_CSV: &str = "\
Date/Time,OAT,Zone1T,Meter
 01/01  01:00:00,10,20,
 01/01  02:00:00,12,21,5.5
 01/01  03:00:00,15,21.5,
";

#[test]
fn eplus_csv_stamps_and_sparse_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "eplusout.csv", EPLUS_CSV.as_bytes());
    let reader = open_source(&path, SourceFormat::Auto).unwrap();

    assert_eq!(reader.available_names().unwrap(), ["OAT", "Zone1T", "Meter"]);

    let out = signals(reader.read(&names(&["Zone1T", "Meter"])).unwrap());
    assert_eq!(out[0].name(), "Zone1T");
    assert_eq!(out[0].times(), &[3600.0, 7200.0, 10800.0]);
    assert_eq!(out[0].values(), &[20.0, 21.0, 21.5]);
    assert_eq!(out[1].times(), &[7200.0]);
    assert_abs_diff_eq!(out[1].values()[0], 5.5);
}

#[test]
fn time_column_is_not_requestable() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "eplusout.csv", EPLUS_CSV.as_bytes());
    let reader = open_source(&path, SourceFormat::Csv).unwrap();
    let err = reader.read(&names(&["Date/Time", "OAT", "oat"])).unwrap_err();
    match err {
        IoError::NameNotFound { missing, available } => {
            assert_eq!(missing, ["Date/Time", "oat"]);
            assert_eq!(available, ["OAT", "Zone1T", "Meter"]);
        }
        other => panic!("expected NameNotFound, got {other:?}"),
    }
}

#[test]
fn empty_column_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "data.csv", b"time,a,b\n0,1,\n60,2,\n");
    let reader = open_source(&path, SourceFormat::Auto).unwrap();
    let err = reader.read(&names(&["b"])).unwrap_err();
    assert!(matches!(err, IoError::Malformed { .. }));
}

#[test]
fn non_numeric_cell_is_csv_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "data.csv", b"time,a\n0,1\n60,warm\n");
    let reader = open_source(&path, SourceFormat::Auto).unwrap();
    let err = reader.read(&names(&["a"])).unwrap_err();
    assert!(matches!(err, IoError::Csv { .. }));
}

#[test]
fn bad_stamp_is_invalid_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "data.csv", b"time,a\n 02/30  01:00:00,1\n");
    let reader = open_source(&path, SourceFormat::Auto).unwrap();
    let err = reader.read(&names(&["a"])).unwrap_err();
    assert!(matches!(err, IoError::InvalidTime { row: 0, .. }));
}

#[test]
fn missing_source_file() {
    let reader = open_source(Path::new("/nonexistent/out.csv"), SourceFormat::Auto).unwrap();
    assert!(matches!(
        reader.available_names(),
        Err(IoError::FileNotFound { .. })
    ));
}

// ---------------------------------------------------------------------------
// MAT v4
// ---------------------------------------------------------------------------

/// Encodes one big-endian `f32` matrix, the way older tools write them.
fn big_endian_f32(name: &str, rows: i32, cols: i32, column_major: &[f32]) -> Vec<u8> {
    let mut out = Vec::new();
    for w in [1010, rows, cols, 0, name.len() as i32 + 1] {
        out.extend(w.to_be_bytes());
    }
    out.extend(name.as_bytes());
    out.push(0);
    for v in column_major {
        out.extend(v.to_be_bytes());
    }
    out
}

#[test]
fn big_endian_mat_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = big_endian_f32("TRoo", 3, 2, &[0.0, 60.0, 120.0, 20.0, 20.5, 21.0]);
    bytes.extend(big_endian_f32("scale", 1, 1, &[2.0]));
    let path = write(&dir, "bench.mat", &bytes);

    let reader = open_source(&path, SourceFormat::Auto).unwrap();
    assert_eq!(reader.format_name(), "mat");
    assert_eq!(reader.available_names().unwrap(), ["TRoo", "scale"]);

    let SourceData::Matrices(m) = reader.read(&names(&["TRoo"])).unwrap() else {
        panic!("expected matrices");
    };
    assert_eq!((m[0].rows(), m[0].cols()), (3, 2));
    assert_eq!(m[0].row(1), &[60.0, 20.5]);
}

#[test]
fn truncated_mat_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = big_endian_f32("x", 2, 2, &[1.0, 2.0, 3.0, 4.0]);
    bytes.truncate(bytes.len() - 2);
    let path = write(&dir, "short.mat", &bytes);
    let err = open_source(&path, SourceFormat::Mat)
        .unwrap()
        .available_names()
        .unwrap_err();
    assert!(matches!(err, IoError::Format { .. }));
}
