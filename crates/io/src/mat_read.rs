//! Named-matrix source over MAT v4 files.

use std::path::{Path, PathBuf};

use simtab_signal::Matrix;
use tracing::debug;

use crate::error::IoError;
use crate::mat4::{self, MatEntry, MatKind};
use crate::source::{SourceData, SourceReader, ensure_names};

/// Reads numeric matrices from a MATLAB v4 file by name.
///
/// Text matrices are not requestable. When a name occurs twice the first
/// matrix wins.
#[derive(Debug, Clone)]
pub struct MatFileReader {
    path: PathBuf,
}

impl MatFileReader {
    /// Creates a reader for the file at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn numeric_names(entries: &[MatEntry]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for e in entries.iter().filter(|e| e.kind == MatKind::Numeric) {
        if !names.contains(&e.name) {
            names.push(e.name.clone());
        }
    }
    names
}

impl SourceReader for MatFileReader {
    fn format_name(&self) -> &'static str {
        "mat"
    }

    fn available_names(&self) -> Result<Vec<String>, IoError> {
        Ok(numeric_names(&mat4::read_file(&self.path)?))
    }

    fn read(&self, names: &[String]) -> Result<SourceData, IoError> {
        let entries = mat4::read_file(&self.path)?;
        ensure_names(names, &numeric_names(&entries))?;
        debug!(
            path = %self.path.display(),
            n_matrices = entries.len(),
            "decoded MAT v4 file"
        );

        let matrices = names
            .iter()
            .filter_map(|n| {
                entries
                    .iter()
                    .find(|e| e.kind == MatKind::Numeric && &e.name == n)
            })
            .map(|e| Matrix::new(e.name.as_str(), e.rows, e.cols, e.data.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SourceData::Matrices(matrices))
    }
}
