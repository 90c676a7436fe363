//! Source-format selection.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::column_table::{ColumnFormat, ColumnTableReader};
use crate::dymola::{DymolaResultReader, is_result_file};
use crate::error::IoError;
use crate::mat_read::MatFileReader;
use crate::mat4;
use crate::source::SourceReader;
use crate::table_read::TableFileReader;

/// Container format of a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceFormat {
    /// Pick by file extension (and, for `.mat`, by content).
    #[default]
    Auto,
    /// CSV with a header row, time in column 0.
    Csv,
    /// Parquet, time in column 0.
    Parquet,
    /// MAT v4 container of named matrices.
    Mat,
    /// Dymola trajectory result.
    Dymola,
    /// NetCDF variables (needs the `netcdf` feature).
    Netcdf,
    /// An existing table file.
    Table,
}

impl SourceFormat {
    /// Every format name accepted by [`FromStr`].
    pub const NAMES: [&'static str; 7] = ["auto", "csv", "parquet", "mat", "dymola", "netcdf", "table"];
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Auto => "auto",
            Self::Csv => "csv",
            Self::Parquet => "parquet",
            Self::Mat => "mat",
            Self::Dymola => "dymola",
            Self::Netcdf => "netcdf",
            Self::Table => "table",
        };
        f.write_str(s)
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "auto" => Self::Auto,
            "csv" => Self::Csv,
            "parquet" => Self::Parquet,
            "mat" => Self::Mat,
            "dymola" => Self::Dymola,
            "netcdf" | "nc" => Self::Netcdf,
            "table" => Self::Table,
            other => {
                return Err(format!(
                    "unknown source format '{other}', expected one of: {}",
                    Self::NAMES.join(", ")
                ));
            }
        })
    }
}

/// Resolves [`SourceFormat::Auto`] for `path`.
///
/// `.mat` files are inspected: a file holding `Aclass` and `dataInfo` is a
/// Dymola result, any other one a plain MAT v4 container.
///
/// # Errors
///
/// Returns [`IoError::Format`] for an unknown extension, or the MAT
/// decoding error when a `.mat` file must be inspected.
pub fn detect_format(path: &Path) -> Result<SourceFormat, IoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let format = match ext.as_str() {
        "csv" => SourceFormat::Csv,
        "parquet" | "pq" => SourceFormat::Parquet,
        "nc" | "nc4" | "cdf" => SourceFormat::Netcdf,
        "txt" | "mos" | "dat" => SourceFormat::Table,
        "mat" => {
            if is_result_file(&mat4::read_file(path)?) {
                SourceFormat::Dymola
            } else {
                SourceFormat::Mat
            }
        }
        _ => {
            return Err(IoError::Format {
                format: "source",
                path: path.to_path_buf(),
                reason: format!("cannot infer format from extension '{ext}'"),
            });
        }
    };
    debug!(path = %path.display(), %format, "detected source format");
    Ok(format)
}

/// Opens a reader for `path`.
///
/// # Errors
///
/// Returns the [`detect_format`] error for `Auto`, or [`IoError::Format`]
/// when NetCDF is requested without the `netcdf` feature.
pub fn open_source(path: &Path, format: SourceFormat) -> Result<Box<dyn SourceReader>, IoError> {
    let reader: Box<dyn SourceReader> = match format {
        SourceFormat::Auto => open_source(path, detect_format(path)?)?,
        SourceFormat::Csv => Box::new(ColumnTableReader::new(path, ColumnFormat::Csv)),
        SourceFormat::Parquet => Box::new(ColumnTableReader::new(path, ColumnFormat::Parquet)),
        SourceFormat::Mat => Box::new(MatFileReader::new(path)),
        SourceFormat::Dymola => Box::new(DymolaResultReader::new(path)),
        SourceFormat::Table => Box::new(TableFileReader::new(path)),
        SourceFormat::Netcdf => open_netcdf(path)?,
    };
    Ok(reader)
}

#[cfg(feature = "netcdf")]
fn open_netcdf(path: &Path) -> Result<Box<dyn SourceReader>, IoError> {
    Ok(Box::new(crate::netcdf_read::NetcdfReader::new(path)))
}

#[cfg(not(feature = "netcdf"))]
fn open_netcdf(path: &Path) -> Result<Box<dyn SourceReader>, IoError> {
    Err(IoError::Format {
        format: "NetCDF",
        path: path.to_path_buf(),
        reason: "built without the 'netcdf' feature".to_string(),
    })
}
