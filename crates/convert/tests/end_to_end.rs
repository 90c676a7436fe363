//! End-to-end tests: source → convert → table file on disk.

use std::path::Path;

use approx::assert_abs_diff_eq;
use simtab_convert::{ConversionError, ConversionRequest, TableLayout, convert};
use simtab_io::{MemorySource, SourceFormat, open_source, read_table};
use simtab_signal::{Matrix, Signal, TimeGrid};

fn oat_zone() -> MemorySource {
    MemorySource::from_signals(vec![
        Signal::new("OAT", vec![0.0, 3600.0, 7200.0], vec![10.0, 12.0, 15.0]).unwrap(),
        Signal::new(
            "Zone1T",
            vec![0.0, 1800.0, 3600.0, 5400.0, 7200.0],
            vec![20.0, 20.5, 21.0, 21.2, 21.5],
        )
        .unwrap(),
    ])
}

fn abc() -> MemorySource {
    MemorySource::from_signals(
        ["A", "B", "C"]
            .iter()
            .enumerate()
            .map(|(i, n)| Signal::new(*n, vec![0.0, 10.0], vec![i as f64, i as f64 + 1.0]).unwrap())
            .collect(),
    )
}

#[test]
fn resampled_combined_table() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let request = ConversionRequest::new(["OAT", "Zone1T"], &out)
        .with_grid(TimeGrid::new(3600.0, 7200.0).unwrap());

    let summary = convert(&request, &oat_zone()).unwrap();
    assert_eq!(summary.blocks, 1);
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.variables, 2);
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "#1\ndouble combined(3, 3)\n0 10 20\n3600 12 21\n7200 15 21.5\n"
    );
}

#[test]
fn selection_order_is_column_order() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let request = ConversionRequest::new(["C", "A"], &out);
    convert(&request, &abc()).unwrap();

    let blocks = read_table(&out).unwrap();
    assert_eq!((blocks[0].rows(), blocks[0].cols()), (2, 3));
    assert_eq!(blocks[0].row(0), &[0.0, 2.0, 0.0]);
}

#[test]
fn unknown_name_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let request = ConversionRequest::new(["Z"], &out);
    let err = convert(&request, &abc()).unwrap_err();
    assert_eq!(
        err,
        ConversionError::NameNotFound {
            missing: vec!["Z".into()],
            available: vec!["A".into(), "B".into(), "C".into()],
        }
    );
    assert!(!out.exists());
}

#[test]
fn empty_selection_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let request = ConversionRequest::new(Vec::<&str>::new(), dir.path().join("out.txt"));
    assert!(matches!(
        convert(&request, &abc()),
        Err(ConversionError::InvalidRequest { .. })
    ));
}

#[test]
fn per_variable_layout() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let request = ConversionRequest::new(["OAT", "Zone1T"], &out)
        .with_layout(TableLayout::PerVariable)
        .with_column_comments(true);
    let summary = convert(&request, &oat_zone()).unwrap();
    assert_eq!(summary.blocks, 2);
    assert_eq!(summary.rows, 8);

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("double OAT(3, 2)\n#Column 0: time\n#Column 1: OAT\n"));
    assert!(text.contains("double Zone1T(5, 2)\n"));
}

#[test]
fn combined_without_grid_needs_shared_times() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let err = convert(&ConversionRequest::new(["OAT", "Zone1T"], &out), &oat_zone()).unwrap_err();
    assert!(matches!(err, ConversionError::MalformedSignal { .. }));
    assert!(!out.exists());
}

#[test]
fn failed_conversion_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    std::fs::write(&out, "previous").unwrap();

    let big = MemorySource::from_signals(vec![
        Signal::new("big", vec![0.0, 1.0], vec![-f64::MAX, f64::MAX]).unwrap(),
    ]);
    let request =
        ConversionRequest::new(["big"], &out).with_grid(TimeGrid::new(0.25, 1.0).unwrap());
    let err = convert(&request, &big).unwrap_err();
    assert!(matches!(err, ConversionError::InterpolationDomainError { .. }));
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "previous");
}

#[test]
fn invalid_table_name_is_write_failure() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let request = ConversionRequest::new(["A"], &out).with_table_name("my table");
    let err = convert(&request, &abc()).unwrap_err();
    assert!(matches!(err, ConversionError::WriteFailure { .. }));
    assert!(!out.exists());
}

#[test]
fn matrices_pass_through_without_grid() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let source = MemorySource::from_matrices(vec![
        Matrix::new("tab1", 2, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(),
        Matrix::new("empty", 0, 0, vec![]).unwrap(),
    ]);
    let summary = convert(&ConversionRequest::new(["empty", "tab1"], &out), &source).unwrap();
    assert_eq!(summary.blocks, 2);
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "#1\ndouble empty(0, 0)\ndouble tab1(2, 3)\n0 1 2\n3 4 5\n"
    );
}

#[test]
fn two_column_matrix_is_resampled() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let source = MemorySource::from_matrices(vec![
        Matrix::new("TRoo", 2, 2, vec![0.0, 20.0, 100.0, 30.0]).unwrap(),
    ]);
    let request = ConversionRequest::new(["TRoo"], &out)
        .with_grid(TimeGrid::new(25.0, 100.0).unwrap())
        .with_table_name("TRoo");
    convert(&request, &source).unwrap();
    let blocks = read_table(&out).unwrap();
    assert_eq!(blocks[0].column(1), [20.0, 22.5, 25.0, 27.5, 30.0]);
}

#[test]
fn eplus_csv_to_table() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("eplusout.csv");
    std::fs::write(
        &csv,
        "Date/Time,OAT,Zone1T\n 01/01  00:30:00,10,20\n 01/01  01:00:00,12,21\n 01/01  01:30:00,15,21.5\n",
    )
    .unwrap();
    let out = dir.path().join("eplus.mos");
    let source = open_source(&csv, SourceFormat::Auto).unwrap();
    let request = ConversionRequest::new(["Zone1T", "OAT"], &out)
        .with_grid(TimeGrid::new(900.0, 7200.0).unwrap())
        .with_table_name("EnergyPlus");
    let summary = convert(&request, source.as_ref()).unwrap();
    assert_eq!(summary.rows, 9);

    let blocks = read_table(&out).unwrap();
    let m = &blocks[0];
    assert_eq!(m.name(), "EnergyPlus");
    // Held before the first stamp, interpolated between, held after.
    assert_eq!(m.row(0), &[0.0, 20.0, 10.0]);
    assert_abs_diff_eq!(m.row(3)[1], 20.5, epsilon = 1e-12);
    assert_eq!(m.row(8), &[7200.0, 21.5, 15.0]);
}

#[test]
fn missing_source_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let source = open_source(Path::new("/nonexistent/eplusout.csv"), SourceFormat::Csv).unwrap();
    let request = ConversionRequest::new(["OAT"], dir.path().join("out.txt"));
    assert!(matches!(
        convert(&request, source.as_ref()),
        Err(ConversionError::SourceUnavailable { .. })
    ));
}
