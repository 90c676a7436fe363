//! Atomic table-file writer.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::IoError;
use crate::table_format::{TableBlock, validate_blocks, write_blocks};

/// Configuration for writing table files.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Emit `#Column i: name` lines after each block header.
    column_comments: bool,
    /// Call `fsync` on the temporary file before publishing it.
    sync: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            column_comments: false,
            sync: true,
        }
    }
}

impl WriterConfig {
    /// Enables or disables `#Column i: name` comment lines.
    pub fn with_column_comments(mut self, enabled: bool) -> Self {
        self.column_comments = enabled;
        self
    }

    /// Enables or disables syncing the file to disk before the rename.
    pub fn with_sync(mut self, enabled: bool) -> Self {
        self.sync = enabled;
        self
    }

    /// Returns whether column comments are written.
    pub fn column_comments(&self) -> bool {
        self.column_comments
    }
}

/// What a successful write produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    /// Destination path.
    pub path: PathBuf,
    /// Number of blocks written.
    pub blocks: usize,
    /// Total data rows over all blocks.
    pub rows: usize,
}

/// Writes `blocks` to `path` in the table format.
///
/// The text is streamed to a temporary file in the destination directory,
/// flushed, synced and renamed over `path`. On any error the temporary
/// file is removed and an existing file at `path` is left as it was.
///
/// # Errors
///
/// Returns [`IoError::InvalidBlockName`] or [`IoError::NonFiniteValue`]
/// before touching the file system, and [`IoError::Write`] if creating,
/// writing or renaming the file fails.
pub fn write_table(
    path: &Path,
    blocks: &[TableBlock],
    config: &WriterConfig,
) -> Result<TableSummary, IoError> {
    validate_blocks(blocks)?;
    publish(path, config.sync, |out| {
        write_blocks(out, blocks, config.column_comments)
    })?;

    let summary = TableSummary {
        path: path.to_path_buf(),
        blocks: blocks.len(),
        rows: blocks.iter().map(|b| b.matrix().rows()).sum(),
    };
    info!(
        path = %path.display(),
        blocks = summary.blocks,
        rows = summary.rows,
        "wrote table file"
    );
    Ok(summary)
}

/// Runs `body` against a temporary file next to `path`, then renames the
/// file onto `path`. Nothing is published if `body` fails.
fn publish<F>(path: &Path, sync: bool, body: F) -> Result<(), IoError>
where
    F: FnOnce(&mut BufWriter<NamedTempFile>) -> std::io::Result<()>,
{
    let write_err = |e: &dyn std::fmt::Display| IoError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir).map_err(|e| write_err(&e))?;
    debug!(tmp = %tmp.path().display(), "writing table to temporary file");

    let mut out = BufWriter::new(tmp);
    body(&mut out).map_err(|e| write_err(&e))?;
    out.flush().map_err(|e| write_err(&e))?;
    let tmp = out.into_inner().map_err(|e| write_err(e.error()))?;
    if sync {
        tmp.as_file().sync_all().map_err(|e| write_err(&e))?;
    }
    tmp.persist(path).map_err(|e| write_err(&e.error))?;
    Ok(())
}
