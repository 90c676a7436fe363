//! The source-reader abstraction shared by every input format.

use simtab_signal::{Matrix, Signal};

use crate::error::IoError;

/// What a source hands back for a set of requested names.
///
/// Time-series formats (CSV, Parquet, Dymola results) produce signals;
/// matrix containers (MAT v4, NetCDF, table files) produce matrices.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
    /// One signal per requested name, in request order.
    Signals(Vec<Signal>),
    /// One matrix per requested name, in request order.
    Matrices(Vec<Matrix>),
}

impl SourceData {
    /// Returns the number of named items.
    pub fn len(&self) -> usize {
        match self {
            Self::Signals(s) => s.len(),
            Self::Matrices(m) => m.len(),
        }
    }

    /// Returns `true` if no item was read.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the item names in order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Signals(s) => s.iter().map(Signal::name).collect(),
            Self::Matrices(m) => m.iter().map(Matrix::name).collect(),
        }
    }
}

/// A readable store of named variables.
///
/// Implementations read only what is asked for. A missing name is reported
/// before any data is decoded.
pub trait SourceReader: Send + Sync {
    /// Short label of the container format, used in log output.
    fn format_name(&self) -> &'static str;

    /// Returns every requestable name, in source order.
    ///
    /// # Errors
    ///
    /// Returns an [`IoError`] if the source cannot be opened or its header
    /// cannot be decoded.
    fn available_names(&self) -> Result<Vec<String>, IoError>;

    /// Reads the requested names.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::NameNotFound`] listing every absent name, or a
    /// format-specific error if the data cannot be decoded.
    fn read(&self, names: &[String]) -> Result<SourceData, IoError>;
}

/// Fails with [`IoError::NameNotFound`] unless every requested name exists.
///
/// `missing` keeps request order and `available` keeps source order.
pub fn ensure_names(requested: &[String], available: &[String]) -> Result<(), IoError> {
    let missing: Vec<String> = requested
        .iter()
        .filter(|n| !available.contains(n))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(IoError::NameNotFound {
            missing,
            available: available.to_vec(),
        })
    }
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// A source backed by data already held in memory.
///
/// Used by tests and by callers that assemble data themselves.
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: SourceData,
}

impl MemorySource {
    /// Creates a source over a list of signals.
    pub fn from_signals(signals: Vec<Signal>) -> Self {
        Self {
            data: SourceData::Signals(signals),
        }
    }

    /// Creates a source over a list of matrices.
    pub fn from_matrices(matrices: Vec<Matrix>) -> Self {
        Self {
            data: SourceData::Matrices(matrices),
        }
    }
}

impl SourceReader for MemorySource {
    fn format_name(&self) -> &'static str {
        "memory"
    }

    fn available_names(&self) -> Result<Vec<String>, IoError> {
        Ok(self.data.names().into_iter().map(str::to_string).collect())
    }

    fn read(&self, names: &[String]) -> Result<SourceData, IoError> {
        ensure_names(names, &self.available_names()?)?;
        Ok(match &self.data {
            SourceData::Signals(all) => SourceData::Signals(
                names
                    .iter()
                    .filter_map(|n| all.iter().find(|s| s.name() == n).cloned())
                    .collect(),
            ),
            SourceData::Matrices(all) => SourceData::Matrices(
                names
                    .iter()
                    .filter_map(|n| all.iter().find(|m| m.name() == n).cloned())
                    .collect(),
            ),
        })
    }
}
