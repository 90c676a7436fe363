//! Error types for simtab-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the simtab-io crate.
///
/// Covers source access failures, format-specific decode errors, name
/// lookups, data-model violations and table-file write failures.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a file exists but cannot be opened or read.
    #[error("cannot read {}: {reason}", path.display())]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error from the Arrow CSV reader.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// Path of the CSV file.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error from the Parquet library.
    #[error("parquet error in {}: {reason}", path.display())]
    Parquet {
        /// Path of the Parquet file.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the NetCDF library.
    #[cfg(feature = "netcdf")]
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Returned when a container's bytes or layout cannot be decoded.
    #[error("malformed {format} file {}: {reason}", path.display())]
    Format {
        /// Short name of the container format (`"MAT v4"`, `"Dymola"`, ...).
        format: &'static str,
        /// Path of the file.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when requested names are absent from a source.
    #[error("{} name(s) not found: [{}]; available: [{}]", missing.len(), missing.join(", "), available.join(", "))]
    NameNotFound {
        /// Requested names the source does not have, in request order.
        missing: Vec<String>,
        /// Names the source does have, in source order.
        available: Vec<String>,
    },

    /// Returned when a time cell cannot be interpreted.
    #[error("invalid time '{value}' in row {row}: {reason}")]
    InvalidTime {
        /// The raw cell text (or number).
        value: String,
        /// Zero-based data row.
        row: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a named column or matrix cannot form a valid signal.
    #[error("malformed data for '{name}': {reason}")]
    Malformed {
        /// Name of the variable.
        name: String,
        /// Description of the problem.
        reason: String,
    },

    /// Wraps a data-model violation.
    #[error(transparent)]
    Signal(#[from] simtab_signal::SignalError),

    /// Returned when a value to be written is NaN or infinite.
    #[error("block '{block}': non-finite value {value} at row {row}, column {col}")]
    NonFiniteValue {
        /// Name of the block being written.
        block: String,
        /// Zero-based row.
        row: usize,
        /// Zero-based column.
        col: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when a block name cannot be represented in the table format.
    #[error("invalid block name '{name}': {reason}")]
    InvalidBlockName {
        /// The rejected name.
        name: String,
        /// Which rule it breaks.
        reason: &'static str,
    },

    /// Returned when writing or publishing the output file fails.
    #[error("cannot write {}: {reason}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a table file does not follow the table format.
    #[error("table syntax error at line {line}: {reason}")]
    TableSyntax {
        /// One-based line number.
        line: usize,
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(feature = "netcdf")]
impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}
