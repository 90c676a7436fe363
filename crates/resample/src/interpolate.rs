//! Point evaluation of a signal by bisection and linear interpolation.

use simtab_signal::Signal;

use crate::error::ResampleError;

/// Evaluates `signal` at time `t`.
///
/// - `t` at or before the first sample returns the first value.
/// - `t` at or after the last sample returns the last value.
/// - `t` equal to a sample time returns that value exactly.
/// - Otherwise the bracketing pair `t_i < t < t_{i+1}` is found by
///   bisection (`O(log n)`) and interpolated linearly.
///
/// # Errors
///
/// Returns [`ResampleError::Domain`] if `t` or the interpolated value is
/// not finite, and [`ResampleError::DuplicateTime`] if the bracketing pair
/// shares a time stamp.
pub fn sample_at(signal: &Signal, t: f64) -> Result<f64, ResampleError> {
    if !t.is_finite() {
        return Err(ResampleError::Domain {
            name: signal.name().to_string(),
            time: t,
            reason: "query time is not finite".to_string(),
        });
    }

    let times = signal.times();
    let values = signal.values();
    let last = times.len() - 1;

    if t <= times[0] {
        return Ok(values[0]);
    }
    if t >= times[last] {
        return Ok(values[last]);
    }

    // times[0] < t < times[last], so hi lands in 1..=last.
    let hi = times.partition_point(|&x| x < t);
    if times[hi] == t {
        return Ok(values[hi]);
    }
    let lo = hi - 1;

    let (t0, t1) = (times[lo], times[hi]);
    let dt = t1 - t0;
    if dt <= 0.0 {
        return Err(ResampleError::DuplicateTime {
            name: signal.name().to_string(),
            index: hi,
            time: t1,
        });
    }

    let (v0, v1) = (values[lo], values[hi]);
    let v = v0 + (v1 - v0) * (t - t0) / dt;
    if !v.is_finite() {
        return Err(ResampleError::Domain {
            name: signal.name().to_string(),
            time: t,
            reason: format!("interpolating between {v0} and {v1} overflowed"),
        });
    }
    Ok(v)
}
