//! Text rendering of the table format.
//!
//! ```text
//! #1
//! double combined(3, 3)
//! 0 10 20
//! 3600 12 21
//! 7200 15 21.5
//! ```
//!
//! The file opens with `#1`. Each block is a header line
//! `double name(rows, cols)` followed by `rows` lines of `cols`
//! space-separated numbers. The next header follows the last row directly.

use std::io::Write;
use std::path::Path;

use simtab_signal::Matrix;

use crate::error::IoError;

/// Magnitudes in `[SMALLEST_POSITIONAL, LARGEST_POSITIONAL)` are written
/// positionally, everything else in scientific notation.
const SMALLEST_POSITIONAL: f64 = 1e-5;
const LARGEST_POSITIONAL: f64 = 1e15;

/// A matrix ready for writing, with optional column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    matrix: Matrix,
    column_names: Vec<String>,
}

impl TableBlock {
    /// Wraps a matrix; the block is named after the matrix.
    pub fn new(matrix: Matrix) -> Self {
        Self {
            matrix,
            column_names: Vec::new(),
        }
    }

    /// Sets the labels used by `#Column i: name` comments.
    pub fn with_column_names(mut self, names: Vec<String>) -> Self {
        self.column_names = names;
        self
    }

    /// Returns the block name.
    pub fn name(&self) -> &str {
        self.matrix.name()
    }

    /// Returns the matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Returns the column labels, possibly empty.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }
}

/// Formats one finite value.
///
/// Always the shortest decimal that parses back to the same `f64`. Zero
/// and magnitudes in `[1e-5, 1e15)` are positional (`3600`, `21.5`,
/// `-0`), the rest scientific (`1.5e-7`, `6.02e23`).
pub fn format_value(v: f64) -> String {
    let magnitude = v.abs();
    if magnitude == 0.0 || (SMALLEST_POSITIONAL..LARGEST_POSITIONAL).contains(&magnitude) {
        format!("{v}")
    } else {
        format!("{v:e}")
    }
}

/// Checks that `name` can appear in a block header.
///
/// # Errors
///
/// Returns [`IoError::InvalidBlockName`] if the name is empty or contains
/// whitespace, `(`, `)`, `,` or `#`.
pub fn validate_block_name(name: &str) -> Result<(), IoError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.chars().any(char::is_whitespace) {
        "name contains whitespace"
    } else if name.contains(['(', ')', ',', '#']) {
        "name contains one of '(' ')' ',' '#'"
    } else {
        return Ok(());
    };
    Err(IoError::InvalidBlockName {
        name: name.to_string(),
        reason,
    })
}

/// Checks names and values of every block before anything is written.
pub(crate) fn validate_blocks(blocks: &[TableBlock]) -> Result<(), IoError> {
    for block in blocks {
        validate_block_name(block.name())?;
        let m = block.matrix();
        for (row, values) in m.iter_rows().enumerate() {
            if let Some((col, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(IoError::NonFiniteValue {
                    block: block.name().to_string(),
                    row,
                    col,
                    value,
                });
            }
        }
    }
    Ok(())
}

/// Streams `blocks` to `out`. Blocks must already be validated.
pub(crate) fn write_blocks<W: Write>(
    out: &mut W,
    blocks: &[TableBlock],
    column_comments: bool,
) -> std::io::Result<()> {
    writeln!(out, "#1")?;
    for block in blocks {
        let m = block.matrix();
        writeln!(out, "double {}({}, {})", block.name(), m.rows(), m.cols())?;
        if column_comments {
            for (c, label) in block.column_names().iter().take(m.cols()).enumerate() {
                writeln!(out, "#Column {c}: {}", label.replace(['\r', '\n'], " "))?;
            }
        }
        let mut line = String::new();
        for row in m.iter_rows() {
            line.clear();
            for (c, &v) in row.iter().enumerate() {
                if c > 0 {
                    line.push(' ');
                }
                line.push_str(&format_value(v));
            }
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

/// Renders blocks into a string, for previews and tests.
///
/// # Errors
///
/// Returns the same validation errors as [`crate::write_table`].
pub fn render_table(blocks: &[TableBlock], column_comments: bool) -> Result<String, IoError> {
    validate_blocks(blocks)?;
    let mut buf = Vec::new();
    write_blocks(&mut buf, blocks, column_comments).map_err(|e| IoError::Write {
        path: Path::new("<memory>").to_path_buf(),
        reason: e.to_string(),
    })?;
    String::from_utf8(buf).map_err(|e| IoError::Write {
        path: Path::new("<memory>").to_path_buf(),
        reason: e.to_string(),
    })
}
