//! Dymola trajectory result files.
//!
//! A result file is a MAT v4 container holding:
//!
//! - `Aclass`: text; row 3 is `binNormal` or `binTrans`,
//! - `name`, `description`: one string per variable,
//! - `dataInfo`: per variable, the data block and a signed 1-based column,
//! - `data_1`, `data_2`, ...: the data blocks, time in the first column.
//!
//! With `binTrans` every matrix except `Aclass` is stored transposed.

use std::path::{Path, PathBuf};

use simtab_signal::Signal;
use tracing::debug;

use crate::error::IoError;
use crate::mat4::{self, MatEntry, MatKind};
use crate::source::{SourceData, SourceReader, ensure_names};

/// Reads trajectories from a Dymola `.mat` result by variable name.
///
/// The abscissa (usually `Time`) is not requestable. A negative column
/// index in `dataInfo` means the stored values are negated. Repeated time
/// stamps at events keep the last sample.
#[derive(Debug, Clone)]
pub struct DymolaResultReader {
    path: PathBuf,
}

impl DymolaResultReader {
    /// Creates a reader for the result at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Layout, IoError> {
        let entries = mat4::read_file(&self.path)?;
        Layout::parse(entries).map_err(|reason| IoError::Format {
            format: "Dymola",
            path: self.path.clone(),
            reason,
        })
    }
}

/// Returns `true` if the MAT v4 entries carry the Dymola result markers.
pub(crate) fn is_result_file(entries: &[MatEntry]) -> bool {
    ["Aclass", "dataInfo"]
        .iter()
        .all(|n| entries.iter().any(|e| e.name == *n))
}

/// Where one variable lives.
#[derive(Debug, Clone)]
struct Variable {
    name: String,
    block: usize,
    column: i64,
}

#[derive(Debug)]
struct Layout {
    transposed: bool,
    variables: Vec<Variable>,
    entries: Vec<MatEntry>,
}

impl Layout {
    fn parse(entries: Vec<MatEntry>) -> Result<Self, String> {
        let find = |name: &str| {
            entries
                .iter()
                .find(|e| e.name == name)
                .ok_or_else(|| format!("missing '{name}' matrix"))
        };

        let aclass = find("Aclass")?;
        if aclass.kind != MatKind::Text {
            return Err("'Aclass' is not text".to_string());
        }
        let transposed = aclass
            .text_rows()
            .get(3)
            .is_some_and(|s| s.trim() == "binTrans");

        let name = find("name")?;
        let names = if transposed {
            name.text_columns()
        } else {
            name.text_rows()
        };

        let info = find("dataInfo")?;
        let (info_vars, info_fields) = if transposed {
            (info.cols, info.rows)
        } else {
            (info.rows, info.cols)
        };
        if info_vars != names.len() || info_fields < 2 {
            return Err(format!(
                "'dataInfo' describes {info_vars} variable(s) with {info_fields} field(s) but 'name' has {}",
                names.len()
            ));
        }
        let field = |var: usize, f: usize| {
            if transposed {
                info.get(f, var)
            } else {
                info.get(var, f)
            }
        };

        let mut variables = Vec::with_capacity(names.len());
        for (i, n) in names.into_iter().enumerate() {
            let block = field(i, 0);
            let column = field(i, 1) as i64;
            // Column 1 holds the abscissa.
            if column.abs() == 1 {
                continue;
            }
            if block < 1.0 {
                return Err(format!("variable '{n}' refers to data block {block}"));
            }
            let block = block as usize;
            variables.push(Variable {
                name: n,
                block,
                column,
            });
        }

        Ok(Self {
            transposed,
            variables,
            entries,
        })
    }

    fn names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.name.clone()).collect()
    }

    fn signal(&self, var: &Variable) -> Result<Signal, IoError> {
        let malformed = |reason: String| IoError::Malformed {
            name: var.name.clone(),
            reason,
        };
        let block_name = format!("data_{}", var.block);
        let block = self
            .entries
            .iter()
            .find(|e| e.name == block_name)
            .ok_or_else(|| malformed(format!("missing '{block_name}' matrix")))?;

        let (samples, width) = if self.transposed {
            (block.cols, block.rows)
        } else {
            (block.rows, block.cols)
        };
        let index = var.column.unsigned_abs() as usize;
        if index == 0 || index > width {
            return Err(malformed(format!(
                "column {} outside '{block_name}' with {width} column(s)",
                var.column
            )));
        }
        let at = |sample: usize, col: usize| {
            if self.transposed {
                block.get(col, sample)
            } else {
                block.get(sample, col)
            }
        };
        let sign = if var.column < 0 { -1.0 } else { 1.0 };

        let mut times: Vec<f64> = Vec::with_capacity(samples);
        let mut values: Vec<f64> = Vec::with_capacity(samples);
        let mut collapsed = 0usize;
        for s in 0..samples {
            let t = at(s, 0);
            let v = sign * at(s, index - 1);
            if times.last() == Some(&t) {
                // Event: keep the value after the event.
                if let Some(last) = values.last_mut() {
                    *last = v;
                }
                collapsed += 1;
            } else {
                times.push(t);
                values.push(v);
            }
        }
        if collapsed > 0 {
            debug!(
                variable = var.name.as_str(),
                collapsed, "merged samples at repeated event times"
            );
        }
        Ok(Signal::new(var.name.as_str(), times, values)?)
    }
}

impl SourceReader for DymolaResultReader {
    fn format_name(&self) -> &'static str {
        "dymola"
    }

    fn available_names(&self) -> Result<Vec<String>, IoError> {
        Ok(self.load()?.names())
    }

    fn read(&self, names: &[String]) -> Result<SourceData, IoError> {
        let layout = self.load()?;
        ensure_names(names, &layout.names())?;
        debug!(
            path = %self.path.display(),
            transposed = layout.transposed,
            n_variables = layout.variables.len(),
            "decoded Dymola result"
        );

        let signals = names
            .iter()
            .filter_map(|n| layout.variables.iter().find(|v| &v.name == n))
            .map(|v| layout.signal(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SourceData::Signals(signals))
    }
}

/// Builds the entries of a small result file for tests.
///
/// Variables: `Time` (abscissa), `k` (parameter in `data_1`), `x` and `y`
/// (trajectories in `data_2`, `y` stored negated).
#[cfg(test)]
pub(crate) fn sample_result(transposed: bool) -> Vec<MatEntry> {
    use crate::mat4::text_entry;

    let storage = if transposed { "binTrans" } else { "binNormal" };
    let names = ["Time", "k", "x", "y"];
    // block, column, interpolation, extrapolation
    let info = [[0.0, 1.0, 0.0, -1.0], [1.0, 2.0, 0.0, -1.0], [2.0, 2.0, 0.0, -1.0], [2.0, -3.0, 0.0, -1.0]];
    let data_1 = [[0.0, 4.5], [10.0, 4.5]];
    let data_2 = [
        [0.0, 1.0, -2.0],
        [5.0, 2.0, -4.0],
        [5.0, 3.0, -6.0],
        [10.0, 4.0, -8.0],
    ];

    let numeric = |name: &str, rows: Vec<Vec<f64>>| {
        let (r, c) = (rows.len(), rows.first().map_or(0, Vec::len));
        let mut m = MatEntry {
            name: name.to_string(),
            rows: r,
            cols: c,
            kind: MatKind::Numeric,
            data: rows.concat(),
        };
        if transposed {
            m = transpose(&m);
        }
        m
    };
    let mut name = text_entry("name", &names);
    if transposed {
        name = transpose(&name);
    }

    vec![
        text_entry("Aclass", &["Atrajectory", "1.1", "", storage]),
        name,
        numeric("dataInfo", info.iter().map(|r| r.to_vec()).collect()),
        numeric("data_1", data_1.iter().map(|r| r.to_vec()).collect()),
        numeric("data_2", data_2.iter().map(|r| r.to_vec()).collect()),
    ]
}

#[cfg(test)]
fn transpose(m: &MatEntry) -> MatEntry {
    let mut data = vec![0.0; m.data.len()];
    for r in 0..m.rows {
        for c in 0..m.cols {
            data[c * m.rows + r] = m.data[r * m.cols + c];
        }
    }
    MatEntry {
        name: m.name.clone(),
        rows: m.cols,
        cols: m.rows,
        kind: m.kind,
        data,
    }
}
