//! Integration tests for the resampling edge-case policy.

use approx::assert_abs_diff_eq;
use simtab_resample::{ResampleError, Signal, TimeGrid, resample, resample_signal, sample_at};

/// Irregularly sampled signal, the way a variable-step simulator reports.
fn irregular() -> Signal {
    Signal::new(
        "irregular",
        vec![7.0, 13.0, 31.0, 32.5, 60.0],
        vec![1.0, -2.0, 4.5, 4.5, 10.0],
    )
    .unwrap()
}

#[test]
fn edge_hold_before_and_after() {
    let s = Signal::new("s", vec![10.0, 20.0, 30.0], vec![1.0, 2.0, 3.0]).unwrap();
    assert_eq!(sample_at(&s, 0.0).unwrap(), 1.0);
    assert_eq!(sample_at(&s, 100.0).unwrap(), 3.0);
}

#[test]
fn grid_through_edges() {
    let s = Signal::new("s", vec![10.0, 20.0, 30.0], vec![1.0, 2.0, 3.0]).unwrap();
    let grid = TimeGrid::new(5.0, 40.0).unwrap();
    let out = resample_signal(&s, &grid).unwrap();
    assert_eq!(
        out.values(),
        &[1.0, 1.0, 1.0, 1.5, 2.0, 2.5, 3.0, 3.0, 3.0]
    );
}

#[test]
fn irregular_signal_matches_brute_force() {
    let s = irregular();
    let grid = TimeGrid::new(0.5, 70.0).unwrap();
    let out = resample_signal(&s, &grid).unwrap();

    for (&t, &got) in out.times().iter().zip(out.values()) {
        // Linear scan reference.
        let times = s.times();
        let values = s.values();
        let want = if t <= times[0] {
            values[0]
        } else if t >= times[times.len() - 1] {
            values[values.len() - 1]
        } else {
            let i = times.windows(2).position(|w| w[0] <= t && t <= w[1]).unwrap();
            values[i] + (values[i + 1] - values[i]) * (t - times[i]) / (times[i + 1] - times[i])
        };
        assert_abs_diff_eq!(got, want, epsilon = 1e-12);
    }
}

#[test]
fn sample_times_on_grid_are_exact() {
    let s = Signal::new(
        "exact",
        vec![0.0, 600.0, 1200.0, 1800.0],
        vec![0.1, 0.2, 0.30000000000000004, 1.0 / 3.0],
    )
    .unwrap();
    let grid = TimeGrid::new(600.0, 1800.0).unwrap();
    let out = resample_signal(&s, &grid).unwrap();
    assert_eq!(out.values(), s.values());
}

#[test]
fn duplicate_timestamps_never_reach_interpolation() {
    let err = Signal::new("dup", vec![5.0, 5.0], vec![1.0, 2.0]).unwrap_err();
    let err: ResampleError = err.into();
    assert!(matches!(err, ResampleError::Signal(_)));
}

#[test]
fn resample_preserves_order_and_names() {
    let a = Signal::new("b_second", vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
    let b = Signal::new("a_first", vec![0.0, 1.0], vec![1.0, 0.0]).unwrap();
    let grid = TimeGrid::new(0.25, 1.0).unwrap();
    let out = resample(&[a, b], &grid).unwrap();
    let names: Vec<&str> = out.iter().map(|s| s.name()).collect();
    assert_eq!(names, ["b_second", "a_first"]);
    assert_eq!(out[1].values(), &[1.0, 0.75, 0.5, 0.25, 0.0]);
}
