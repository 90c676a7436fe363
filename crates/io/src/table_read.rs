//! Parser for the table format, and a source over existing table files.

use std::path::{Path, PathBuf};

use simtab_signal::Matrix;

use crate::error::IoError;
use crate::source::{SourceData, SourceReader, ensure_names};

fn syntax(line: usize, reason: impl Into<String>) -> IoError {
    IoError::TableSyntax {
        line,
        reason: reason.into(),
    }
}

/// Parses `double name(rows, cols)`; also accepts `float` and `(r,c)`.
fn parse_header(text: &str, line: usize) -> Result<(String, usize, usize), IoError> {
    let text = text.trim();
    let rest = text
        .strip_prefix("double")
        .or_else(|| text.strip_prefix("float"))
        .filter(|r| r.starts_with(char::is_whitespace))
        .ok_or_else(|| syntax(line, format!("expected 'double name(rows, cols)', got '{text}'")))?
        .trim_start();

    let (name, dims) = rest
        .split_once('(')
        .ok_or_else(|| syntax(line, "missing '(' in block header"))?;
    let dims = dims
        .trim_end()
        .strip_suffix(')')
        .ok_or_else(|| syntax(line, "missing ')' in block header"))?;
    let (rows, cols) = dims
        .split_once(',')
        .ok_or_else(|| syntax(line, "expected 'rows, cols' in block header"))?;
    let parse_dim = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|_| syntax(line, format!("'{}' is not a dimension", s.trim())))
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(syntax(line, "block name is empty"));
    }
    Ok((name.to_string(), parse_dim(rows)?, parse_dim(cols)?))
}

/// Parses table text into one matrix per block, in file order.
///
/// The first line must be `#1`. Outside block bodies, blank lines and
/// lines starting with `#` are skipped; inside a body only `#` lines are,
/// except that blank lines are the rows of a zero-column block. Values are
/// separated by whitespace or commas.
///
/// # Errors
///
/// Returns [`IoError::TableSyntax`] with the offending line number.
pub fn parse_table(text: &str) -> Result<Vec<Matrix>, IoError> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    match lines.next() {
        Some((_, first)) if first.trim() == "#1" => {}
        _ => return Err(syntax(1, "expected '#1' on the first line")),
    }

    let mut blocks = Vec::new();
    while let Some((n, line)) = lines.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (name, rows, cols) = parse_header(trimmed, n)?;

        let mut data = Vec::with_capacity(rows.saturating_mul(cols).min(1 << 20));
        let mut read = 0;
        while read < rows {
            let Some((n, line)) = lines.next() else {
                return Err(syntax(
                    n,
                    format!("block '{name}' ends after {read} of {rows} rows"),
                ));
            };
            let trimmed = line.trim();
            if trimmed.starts_with('#') || (trimmed.is_empty() && cols > 0) {
                continue;
            }
            let before = data.len();
            for token in trimmed
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
            {
                let v: f64 = token
                    .parse()
                    .map_err(|_| syntax(n, format!("'{token}' is not a number")))?;
                if !v.is_finite() {
                    return Err(syntax(n, format!("'{token}' is not finite")));
                }
                data.push(v);
            }
            if data.len() - before != cols {
                return Err(syntax(
                    n,
                    format!(
                        "block '{name}' row has {} value(s), expected {cols}",
                        data.len() - before
                    ),
                ));
            }
            read += 1;
        }
        blocks.push(Matrix::new(name, rows, cols, data)?);
    }
    Ok(blocks)
}

/// Reads and parses the table file at `path`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::Read`] or
/// [`IoError::TableSyntax`].
pub fn read_table(path: &Path) -> Result<Vec<Matrix>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| IoError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_table(&text)
}

/// Source over an existing table file; each block is a named matrix.
#[derive(Debug, Clone)]
pub struct TableFileReader {
    path: PathBuf,
}

impl TableFileReader {
    /// Creates a reader for the file at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SourceReader for TableFileReader {
    fn format_name(&self) -> &'static str {
        "table"
    }

    fn available_names(&self) -> Result<Vec<String>, IoError> {
        Ok(read_table(&self.path)?
            .iter()
            .map(|m| m.name().to_string())
            .collect())
    }

    fn read(&self, names: &[String]) -> Result<SourceData, IoError> {
        let blocks = read_table(&self.path)?;
        let available: Vec<String> = blocks.iter().map(|m| m.name().to_string()).collect();
        ensure_names(names, &available)?;
        Ok(SourceData::Matrices(
            names
                .iter()
                .filter_map(|n| blocks.iter().find(|m| m.name() == n).cloned())
                .collect(),
        ))
    }
}
