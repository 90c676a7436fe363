//! Error types for the simtab-resample crate.

/// Error type for all fallible operations in the simtab-resample crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResampleError {
    /// Returned when two neighbouring samples share a time stamp.
    #[error("signal '{name}': duplicate time {time} at index {index}")]
    DuplicateTime {
        /// Name of the signal.
        name: String,
        /// Index of the second of the two equal stamps.
        index: usize,
        /// The repeated time stamp.
        time: f64,
    },

    /// Returned when a query time or an interpolated value is not finite.
    #[error("signal '{name}': cannot interpolate at t={time}: {reason}")]
    Domain {
        /// Name of the signal.
        name: String,
        /// Query time.
        time: f64,
        /// Description of the problem.
        reason: String,
    },

    /// Signal construction error.
    #[error(transparent)]
    Signal(#[from] simtab_signal::SignalError),
}
