//! Error types for the simtab-signal crate.

/// Error type for all fallible constructors in the simtab-signal crate.
///
/// Every variant names the offending signal or matrix so that a failed
/// conversion can be diagnosed without opening the source data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignalError {
    /// Returned when a signal has no samples.
    #[error("signal '{name}' has no samples")]
    Empty {
        /// Name of the signal.
        name: String,
    },

    /// Returned when `times` and `values` differ in length.
    #[error("signal '{name}': {times} times but {values} values")]
    LengthMismatch {
        /// Name of the signal.
        name: String,
        /// Number of time stamps.
        times: usize,
        /// Number of values.
        values: usize,
    },

    /// Returned when a time stamp does not exceed its predecessor.
    #[error(
        "signal '{name}': time {current} at index {index} does not exceed previous time {previous}"
    )]
    NonIncreasingTime {
        /// Name of the signal.
        name: String,
        /// Index of the offending time stamp.
        index: usize,
        /// Time stamp at `index - 1`.
        previous: f64,
        /// Time stamp at `index`.
        current: f64,
    },

    /// Returned when a time or value is NaN or infinite.
    #[error("signal '{name}': non-finite {field} {value} at index {index}")]
    NonFinite {
        /// Name of the signal.
        name: String,
        /// Either `"time"` or `"value"`.
        field: &'static str,
        /// Index of the offending element.
        index: usize,
        /// The offending element.
        value: f64,
    },

    /// Returned when matrix data does not fill `rows x cols`.
    #[error("matrix '{name}': shape {rows}x{cols} needs {expected} values, got {got}")]
    MatrixShape {
        /// Name of the matrix.
        name: String,
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
        /// `rows * cols`.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// Returned when a time grid definition is unusable.
    #[error("invalid time grid: {reason}")]
    InvalidGrid {
        /// Description of the problem.
        reason: String,
    },
}
