//! Resampling of whole signals onto a grid.

use simtab_signal::{Signal, TimeGrid};
use tracing::debug;

use crate::error::ResampleError;
use crate::interpolate::sample_at;

/// Resamples one signal onto `grid`.
///
/// The output has exactly `grid.len()` points, its times are
/// `grid.points()`, and it keeps the input's name.
///
/// # Errors
///
/// Propagates [`sample_at`] errors.
pub fn resample_signal(signal: &Signal, grid: &TimeGrid) -> Result<Signal, ResampleError> {
    resample_onto(signal, grid.points())
}

/// Resamples every signal onto `grid`, preserving input order.
///
/// All outputs share one time base, so they can be written as columns of a
/// single table.
///
/// # Errors
///
/// Returns the first error encountered; no partial result is returned.
pub fn resample(signals: &[Signal], grid: &TimeGrid) -> Result<Vec<Signal>, ResampleError> {
    let points = grid.points();
    debug!(
        n_signals = signals.len(),
        n_points = points.len(),
        step = grid.step(),
        "resampling onto uniform grid"
    );
    signals
        .iter()
        .map(|s| resample_onto(s, points.clone()))
        .collect()
}

fn resample_onto(signal: &Signal, points: Vec<f64>) -> Result<Signal, ResampleError> {
    let values = points
        .iter()
        .map(|&t| sample_at(signal, t))
        .collect::<Result<Vec<_>, _>>()?;

    if signal.start_time() > 0.0 || signal.end_time() < points[points.len() - 1] {
        debug!(
            signal = signal.name(),
            start = signal.start_time(),
            end = signal.end_time(),
            "grid extends past signal; holding edge values"
        );
    }

    Ok(Signal::new(signal.name(), points, values)?)
}
