//! The conversion pipeline: read, resample, lay out, write.

use std::path::PathBuf;

use simtab_io::{SourceData, SourceReader, TableBlock, WriterConfig, write_table};
use simtab_resample::resample;
use simtab_signal::{Matrix, Signal};
use tracing::{debug, info};

use crate::error::ConversionError;
use crate::request::{ConversionRequest, TableLayout};

/// What a successful conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    /// The written file.
    pub output_path: PathBuf,
    /// Number of blocks in the file.
    pub blocks: usize,
    /// Data rows over all blocks.
    pub rows: usize,
    /// Number of variables exported.
    pub variables: usize,
}

/// Converts the requested variables of `source` into a table file.
///
/// ```text
/// validate ─► source.read ─► [resample onto grid] ─► layout ─► write_table
/// ```
///
/// With a grid every variable must be time-indexed: signals are resampled
/// directly and a two-column matrix is read as `(time, value)`. Without a
/// grid matrices are written unchanged, one block each, and signals keep
/// their own samples.
///
/// Nothing is written unless every step succeeds.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidRequest`] before touching the source,
/// then whatever kind the failing step maps to.
pub fn convert(
    request: &ConversionRequest,
    source: &dyn SourceReader,
) -> Result<ConversionSummary, ConversionError> {
    request.validate()?;
    let names = request.selected_names();
    info!(
        format = source.format_name(),
        n_names = names.len(),
        output = %request.output_path().display(),
        "starting conversion"
    );

    let data = source.read(names)?;
    let blocks = match (request.grid(), data) {
        (Some(grid), data) => {
            let signals = time_indexed(data)?;
            let resampled = resample(&signals, grid)?;
            debug!(n_points = grid.len(), "resampled onto grid");
            layout_signals(request, &resampled)?
        }
        (None, SourceData::Matrices(matrices)) => {
            matrices.into_iter().map(TableBlock::new).collect()
        }
        (None, SourceData::Signals(signals)) => layout_signals(request, &signals)?,
    };

    let config = WriterConfig::default().with_column_comments(request.column_comments());
    let written = write_table(request.output_path(), &blocks, &config)
        .map_err(|e| ConversionError::from_write(e, request.output_path()))?;

    let summary = ConversionSummary {
        output_path: written.path,
        blocks: written.blocks,
        rows: written.rows,
        variables: names.len(),
    };
    info!(
        blocks = summary.blocks,
        rows = summary.rows,
        variables = summary.variables,
        "conversion finished"
    );
    Ok(summary)
}

/// Turns source data into signals for resampling.
fn time_indexed(data: SourceData) -> Result<Vec<Signal>, ConversionError> {
    match data {
        SourceData::Signals(signals) => Ok(signals),
        SourceData::Matrices(matrices) => matrices.iter().map(matrix_to_signal).collect(),
    }
}

/// Reads a two-column matrix as `(time, value)` pairs.
fn matrix_to_signal(m: &Matrix) -> Result<Signal, ConversionError> {
    if m.cols() != 2 {
        return Err(ConversionError::MalformedSignal {
            reason: format!(
                "'{}' is {}x{}; resampling needs two columns (time, value)",
                m.name(),
                m.rows(),
                m.cols()
            ),
        });
    }
    Ok(Signal::new(m.name(), m.column(0), m.column(1))?)
}

fn layout_signals(
    request: &ConversionRequest,
    signals: &[Signal],
) -> Result<Vec<TableBlock>, ConversionError> {
    match request.layout() {
        TableLayout::Combined => Ok(vec![combined_block(request.table_name(), signals)?]),
        TableLayout::PerVariable => per_variable_blocks(signals),
    }
}

/// One block with time in column 0 and one column per signal.
///
/// All signals must share one time base.
fn combined_block(table_name: &str, signals: &[Signal]) -> Result<TableBlock, ConversionError> {
    let Some(first) = signals.first() else {
        return Err(ConversionError::InvalidRequest {
            reason: "no variables to write".to_string(),
        });
    };
    if let Some(other) = signals.iter().find(|s| s.times() != first.times()) {
        return Err(ConversionError::MalformedSignal {
            reason: format!(
                "'{}' and '{}' have different time bases; set a grid or use the per-variable layout",
                first.name(),
                other.name()
            ),
        });
    }

    let mut columns: Vec<&[f64]> = Vec::with_capacity(signals.len() + 1);
    columns.push(first.times());
    columns.extend(signals.iter().map(Signal::values));
    let matrix = Matrix::from_columns(table_name, &columns)?;
    debug!(
        block = table_name,
        rows = matrix.rows(),
        cols = matrix.cols(),
        "built combined block"
    );

    let mut labels = vec!["time".to_string()];
    labels.extend(signals.iter().map(|s| s.name().to_string()));
    Ok(TableBlock::new(matrix).with_column_names(labels))
}

/// Maps a variable name onto `[A-Za-z0-9_]`.
pub(crate) fn sanitize_block_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// One `(time, value)` block per signal, named after the signal.
fn per_variable_blocks(signals: &[Signal]) -> Result<Vec<TableBlock>, ConversionError> {
    let mut used: Vec<(String, &str)> = Vec::with_capacity(signals.len());
    let mut blocks = Vec::with_capacity(signals.len());
    for s in signals {
        let block_name = sanitize_block_name(s.name());
        if let Some((_, earlier)) = used.iter().find(|(b, _)| *b == block_name) {
            return Err(ConversionError::InvalidRequest {
                reason: format!(
                    "'{earlier}' and '{}' both map to block name '{block_name}'",
                    s.name()
                ),
            });
        }
        let matrix = Matrix::from_columns(block_name.as_str(), &[s.times(), s.values()])?;
        debug!(variable = s.name(), block = block_name.as_str(), rows = matrix.rows(), "built block");
        blocks.push(
            TableBlock::new(matrix).with_column_names(vec!["time".to_string(), s.name().to_string()]),
        );
        used.push((block_name, s.name()));
    }
    Ok(blocks)
}
