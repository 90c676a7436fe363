//! Low-level Parquet reading.

use std::fs::File;
use std::path::Path;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ProjectionMask;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::IoError;

fn parquet_err(path: &Path, e: impl ToString) -> IoError {
    IoError::Parquet {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

fn builder(path: &Path) -> Result<ParquetRecordBatchReaderBuilder<File>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| IoError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| parquet_err(path, e))
}

/// Returns every top-level column name from the file footer.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::Read`] or
/// [`IoError::Parquet`].
pub(crate) fn read_header(path: &Path) -> Result<Vec<String>, IoError> {
    let builder = builder(path)?;
    Ok(builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect())
}

/// Reads column 0 plus the `projection` root columns.
///
/// Columns come back in file order, not projection order.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] if the file cannot be decoded.
pub(crate) fn read_batches(path: &Path, projection: &[usize]) -> Result<Vec<RecordBatch>, IoError> {
    let builder = builder(path)?;
    let mut roots = vec![0];
    roots.extend(projection.iter().copied().filter(|&i| i != 0));
    let mask = ProjectionMask::roots(builder.parquet_schema(), roots);
    let reader = builder
        .with_projection(mask)
        .build()
        .map_err(|e| parquet_err(path, e))?;

    reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| parquet_err(path, e))
}
