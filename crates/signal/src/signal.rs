//! Named time series.

use crate::error::SignalError;

/// An ordered, named time series.
///
/// Invariants, checked once by [`Signal::new`]:
/// - at least one sample,
/// - `times.len() == values.len()`,
/// - `times` strictly increasing (no duplicate stamps),
/// - every time and value finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    name: String,
    times: Vec<f64>,
    values: Vec<f64>,
}

impl Signal {
    /// Creates a signal after validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Empty`], [`SignalError::LengthMismatch`],
    /// [`SignalError::NonFinite`] or [`SignalError::NonIncreasingTime`].
    pub fn new(
        name: impl Into<String>,
        times: Vec<f64>,
        values: Vec<f64>,
    ) -> Result<Self, SignalError> {
        let name = name.into();

        if times.len() != values.len() {
            return Err(SignalError::LengthMismatch {
                name,
                times: times.len(),
                values: values.len(),
            });
        }
        if times.is_empty() {
            return Err(SignalError::Empty { name });
        }

        for (field, data) in [("time", &times), ("value", &values)] {
            if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(SignalError::NonFinite {
                    name,
                    field,
                    index,
                    value,
                });
            }
        }

        if let Some(index) = (1..times.len()).find(|&i| times[i] <= times[i - 1]) {
            return Err(SignalError::NonIncreasingTime {
                name,
                index,
                previous: times[index - 1],
                current: times[index],
            });
        }

        Ok(Self {
            name,
            times,
            values,
        })
    }

    /// Returns the signal name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sample times.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the sample values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of samples (always at least one).
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// First sample time.
    pub fn start_time(&self) -> f64 {
        self.times[0]
    }

    /// Last sample time.
    pub fn end_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Consumes the signal and returns `(name, times, values)`.
    pub fn into_parts(self) -> (String, Vec<f64>, Vec<f64>) {
        (self.name, self.times, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_signal() {
        let s = Signal::new("OAT", vec![0.0, 3600.0, 7200.0], vec![10.0, 12.0, 15.0])
            .expect("valid signal");
        assert_eq!(s.name(), "OAT");
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.start_time(), 0.0);
        assert_eq!(s.end_time(), 7200.0);
    }

    #[test]
    fn single_sample_is_valid() {
        let s = Signal::new("c", vec![5.0], vec![1.0]).expect("one sample is enough");
        assert_eq!(s.start_time(), s.end_time());
    }

    #[test]
    fn empty_rejected() {
        let err = Signal::new("x", vec![], vec![]).unwrap_err();
        assert!(matches!(err, SignalError::Empty { .. }));
    }

    #[test]
    fn length_mismatch_rejected() {
        let err = Signal::new("x", vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            SignalError::LengthMismatch {
                name: "x".to_string(),
                times: 2,
                values: 1,
            }
        );
    }

    #[test]
    fn duplicate_time_rejected() {
        let err = Signal::new("dup", vec![5.0, 5.0], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            SignalError::NonIncreasingTime { index: 1, .. }
        ));
    }

    #[test]
    fn decreasing_time_rejected() {
        let err = Signal::new("dec", vec![0.0, 10.0, 9.0], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            SignalError::NonIncreasingTime { index: 2, .. }
        ));
    }

    #[test]
    fn nan_value_rejected() {
        let err = Signal::new("n", vec![0.0, 1.0], vec![1.0, f64::NAN]).unwrap_err();
        assert!(matches!(
            err,
            SignalError::NonFinite {
                field: "value",
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn infinite_time_rejected() {
        let err = Signal::new("n", vec![0.0, f64::INFINITY], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, SignalError::NonFinite { field: "time", .. }));
    }

    #[test]
    fn into_parts_round_trip() {
        let s = Signal::new("a", vec![1.0, 2.0], vec![3.0, 4.0]).unwrap();
        let (name, times, values) = s.into_parts();
        assert_eq!(name, "a");
        assert_eq!(times, vec![1.0, 2.0]);
        assert_eq!(values, vec![3.0, 4.0]);
    }
}
