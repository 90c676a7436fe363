//! Uniform time grid.

use crate::error::SignalError;

/// Upper bound on the number of grid points a [`TimeGrid`] may describe.
const MAX_POINTS: f64 = 1e9;

/// A uniform sequence of times `0, step, 2*step, ...` up to and including
/// the largest multiple of `step` not exceeding `final_time`.
///
/// The number of points is `floor(final_time / step) + 1`, so the last
/// point never exceeds `final_time`. The quotient is taken in floating
/// point: `TimeGrid::new(0.1, 0.3)` has three points because
/// `0.3 / 0.1` evaluates to `2.9999999999999996`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    step: f64,
    final_time: f64,
    len: usize,
}

impl TimeGrid {
    /// Creates a grid with spacing `step` covering `[0, final_time]`.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::InvalidGrid`] if `step` is not a positive
    /// finite number, `final_time` is negative or not finite, or the grid
    /// would exceed `1e9` points.
    pub fn new(step: f64, final_time: f64) -> Result<Self, SignalError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(SignalError::InvalidGrid {
                reason: format!("step must be a positive finite number, got {step}"),
            });
        }
        if !(final_time.is_finite() && final_time >= 0.0) {
            return Err(SignalError::InvalidGrid {
                reason: format!("final time must be a non-negative finite number, got {final_time}"),
            });
        }

        let mut intervals = (final_time / step).floor();
        // The division may round up onto the next integer.
        if intervals > 0.0 && intervals * step > final_time {
            intervals -= 1.0;
        }
        if intervals + 1.0 > MAX_POINTS {
            return Err(SignalError::InvalidGrid {
                reason: format!(
                    "step {step} over final time {final_time} gives {intervals} intervals, \
                     more than the supported {MAX_POINTS} points"
                ),
            });
        }

        Ok(Self {
            step,
            final_time,
            len: intervals as usize + 1,
        })
    }

    /// Grid spacing in seconds.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Upper bound of the grid in seconds.
    pub fn final_time(&self) -> f64 {
        self.final_time
    }

    /// Number of grid points (always at least one).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a grid contains at least the point `0`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns point `i` as `i * step`, or `None` past the end.
    pub fn point(&self, i: usize) -> Option<f64> {
        (i < self.len).then(|| i as f64 * self.step)
    }

    /// Iterates over the grid points.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(|i| i as f64 * self.step)
    }

    /// Collects the grid points.
    pub fn points(&self) -> Vec<f64> {
        self.iter().collect()
    }
}
