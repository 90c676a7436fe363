//! Sources whose first column is time and whose other columns are variables.

use std::path::{Path, PathBuf};

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use simtab_signal::Signal;
use tracing::{debug, warn};

use crate::error::IoError;
use crate::eplus_time::parse_time_cell;
use crate::source::{SourceData, SourceReader, ensure_names};
use crate::{csv_read, parquet_read};

/// Physical container of a column table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    /// Comma-separated text with a header row.
    Csv,
    /// Apache Parquet.
    Parquet,
}

/// Reads named columns of a CSV or Parquet table as signals.
///
/// Column 0 is the time column and is never requestable. Names match
/// header text exactly. Null cells are skipped per column, so each signal
/// keeps only the rows where it has a value.
#[derive(Debug, Clone)]
pub struct ColumnTableReader {
    path: PathBuf,
    format: ColumnFormat,
}

impl ColumnTableReader {
    /// Creates a reader for the table at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>, format: ColumnFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Returns the table path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn header(&self) -> Result<Vec<String>, IoError> {
        match self.format {
            ColumnFormat::Csv => csv_read::read_header(&self.path),
            ColumnFormat::Parquet => parquet_read::read_header(&self.path),
        }
    }
}

impl SourceReader for ColumnTableReader {
    fn format_name(&self) -> &'static str {
        match self.format {
            ColumnFormat::Csv => "csv",
            ColumnFormat::Parquet => "parquet",
        }
    }

    fn available_names(&self) -> Result<Vec<String>, IoError> {
        let mut header = self.header()?;
        if header.is_empty() {
            return Ok(header);
        }
        header.remove(0);
        Ok(header)
    }

    fn read(&self, names: &[String]) -> Result<SourceData, IoError> {
        let header = self.header()?;
        let available = header.get(1..).unwrap_or_default();
        ensure_names(names, available)?;

        // Header position of each requested name; first match wins on
        // duplicated headers.
        let mut projection: Vec<usize> = names
            .iter()
            .filter_map(|n| available.iter().position(|h| h == n).map(|i| i + 1))
            .collect();
        projection.sort_unstable();
        projection.dedup();

        let batches = match self.format {
            ColumnFormat::Csv => csv_read::read_batches(&self.path, &projection)?,
            ColumnFormat::Parquet => parquet_read::read_batches(&self.path, &projection)?,
        };
        debug!(
            path = %self.path.display(),
            n_batches = batches.len(),
            n_columns = projection.len(),
            "read column table"
        );

        let signals = signals_from_batches(&batches, names)?;
        Ok(SourceData::Signals(signals))
    }
}

// ---------------------------------------------------------------------------
// Batch decoding
// ---------------------------------------------------------------------------

/// Builds one signal per name from batches whose column 0 is time.
///
/// # Errors
///
/// Returns [`IoError::InvalidTime`] for a bad or missing time cell,
/// [`IoError::Malformed`] for a column without any value and
/// [`IoError::Signal`] when the kept samples break signal invariants.
pub(crate) fn signals_from_batches(
    batches: &[RecordBatch],
    names: &[String],
) -> Result<Vec<Signal>, IoError> {
    let times = time_column(batches)?;

    names
        .iter()
        .map(|name| {
            let mut t = Vec::new();
            let mut v = Vec::new();
            let mut row = 0;
            for batch in batches {
                let column = value_column(batch, name)?;
                let values = column.as_primitive::<Float64Type>();
                for i in 0..values.len() {
                    if !values.is_null(i) {
                        t.push(times[row + i]);
                        v.push(values.value(i));
                    }
                }
                row += batch.num_rows();
            }

            if t.is_empty() {
                return Err(IoError::Malformed {
                    name: name.clone(),
                    reason: "column has no values".to_string(),
                });
            }
            if t.len() < times.len() {
                warn!(
                    column = name.as_str(),
                    skipped = times.len() - t.len(),
                    "skipped empty cells"
                );
            }
            Ok(Signal::new(name.as_str(), t, v)?)
        })
        .collect()
}

fn value_column(batch: &RecordBatch, name: &str) -> Result<arrow::array::ArrayRef, IoError> {
    let schema = batch.schema();
    let index = schema
        .fields()
        .iter()
        .skip(1)
        .position(|f| f.name() == name)
        .map(|i| i + 1)
        .ok_or_else(|| IoError::Malformed {
            name: name.to_string(),
            reason: "column missing from data".to_string(),
        })?;
    cast(batch.column(index), &DataType::Float64).map_err(|e| IoError::Malformed {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Decodes column 0 of every batch into seconds.
///
/// Text cells may be numbers or EnergyPlus stamps; numeric columns are
/// cast to `f64`.
fn time_column(batches: &[RecordBatch]) -> Result<Vec<f64>, IoError> {
    let mut out = Vec::new();
    for batch in batches {
        if batch.num_columns() == 0 {
            continue;
        }
        let column = batch.column(0);
        let text = matches!(
            column.data_type(),
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
        );
        if text {
            let strings = cast(column, &DataType::Utf8).map_err(time_cast_err)?;
            let strings = strings.as_string::<i32>();
            for i in 0..strings.len() {
                let row = out.len();
                if strings.is_null(i) {
                    return Err(missing_time(row));
                }
                out.push(parse_time_cell(strings.value(i), row)?);
            }
        } else {
            let numbers = cast(column, &DataType::Float64).map_err(time_cast_err)?;
            let numbers = numbers.as_primitive::<Float64Type>();
            for i in 0..numbers.len() {
                let row = out.len();
                if numbers.is_null(i) {
                    return Err(missing_time(row));
                }
                let t = numbers.value(i);
                if !t.is_finite() {
                    return Err(IoError::InvalidTime {
                        value: t.to_string(),
                        row,
                        reason: "time is not finite".to_string(),
                    });
                }
                out.push(t);
            }
        }
    }
    Ok(out)
}

fn missing_time(row: usize) -> IoError {
    IoError::InvalidTime {
        value: String::new(),
        row,
        reason: "time cell is empty".to_string(),
    }
}

fn time_cast_err(e: arrow::error::ArrowError) -> IoError {
    IoError::InvalidTime {
        value: String::new(),
        row: 0,
        reason: e.to_string(),
    }
}
