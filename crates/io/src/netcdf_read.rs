//! Named-matrix source over NetCDF files.

use std::path::{Path, PathBuf};

use simtab_signal::Matrix;
use tracing::debug;

use crate::error::IoError;
use crate::source::{SourceData, SourceReader, ensure_names};

/// Reads NetCDF variables as matrices.
///
/// Scalars become `1 x 1`, 1-D variables `n x 1` and 2-D variables keep
/// their `(dim0, dim1)` shape. Variables with more dimensions are
/// malformed.
#[derive(Debug, Clone)]
pub struct NetcdfReader {
    path: PathBuf,
}

impl NetcdfReader {
    /// Creates a reader for the file at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<netcdf::File, IoError> {
        if !self.path.exists() {
            return Err(IoError::FileNotFound {
                path: self.path.clone(),
            });
        }
        Ok(netcdf::open(&self.path)?)
    }
}

fn read_variable(file: &netcdf::File, name: &str) -> Result<Matrix, IoError> {
    let var = file.variable(name).ok_or_else(|| IoError::Malformed {
        name: name.to_string(),
        reason: "variable vanished while reading".to_string(),
    })?;
    let dims: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let (rows, cols) = match dims.as_slice() {
        [] => (1, 1),
        [n] => (*n, 1),
        [r, c] => (*r, *c),
        _ => {
            return Err(IoError::Malformed {
                name: name.to_string(),
                reason: format!("{} dimensions, at most 2 supported", dims.len()),
            });
        }
    };
    let data = var.get_values::<f64, _>(..)?;
    Ok(Matrix::new(name, rows, cols, data)?)
}

impl SourceReader for NetcdfReader {
    fn format_name(&self) -> &'static str {
        "netcdf"
    }

    fn available_names(&self) -> Result<Vec<String>, IoError> {
        let file = self.open()?;
        Ok(file.variables().map(|v| v.name()).collect())
    }

    fn read(&self, names: &[String]) -> Result<SourceData, IoError> {
        let file = self.open()?;
        let available: Vec<String> = file.variables().map(|v| v.name()).collect();
        ensure_names(names, &available)?;
        debug!(
            path = %self.path.display(),
            n_variables = available.len(),
            "opened NetCDF file"
        );

        let matrices = names
            .iter()
            .map(|n| read_variable(&file, n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SourceData::Matrices(matrices))
    }
}
