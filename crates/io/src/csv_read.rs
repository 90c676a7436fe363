//! Low-level CSV reading via `arrow-csv`.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow_csv::ReaderBuilder;
use arrow_csv::reader::Format;

use crate::error::IoError;

fn csv_err(path: &Path, e: impl ToString) -> IoError {
    IoError::Csv {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

fn open(path: &Path) -> Result<File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    File::open(path).map_err(|e| IoError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Reads the header row and returns every column name, time column included.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::Read`] or [`IoError::Csv`].
pub(crate) fn read_header(path: &Path) -> Result<Vec<String>, IoError> {
    let mut file = open(path)?;
    let (schema, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut file, Some(0))
        .map_err(|e| csv_err(path, e))?;
    Ok(schema.fields().iter().map(|f| f.name().clone()).collect())
}

/// Reads column 0 as text and `projection` columns as `Float64`.
///
/// `projection` holds file column indices; column 0 is always read first.
/// Empty cells become nulls.
///
/// # Errors
///
/// Returns [`IoError::Csv`] if a projected cell is not numeric or the
/// rows are ragged.
pub(crate) fn read_batches(path: &Path, projection: &[usize]) -> Result<Vec<RecordBatch>, IoError> {
    let header = read_header(path)?;
    let fields: Vec<Field> = header
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let data_type = if i == 0 || !projection.contains(&i) {
                DataType::Utf8
            } else {
                DataType::Float64
            };
            Field::new(name.as_str(), data_type, true)
        })
        .collect();
    let schema = Schema::new(fields);

    let mut columns = Vec::with_capacity(projection.len() + 1);
    columns.push(0);
    columns.extend(projection.iter().copied().filter(|&i| i != 0));

    let file = open(path)?;
    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_format(Format::default().with_header(true))
        .with_projection(columns)
        .build(file)
        .map_err(|e| csv_err(path, e))?;

    reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| csv_err(path, e))
}
