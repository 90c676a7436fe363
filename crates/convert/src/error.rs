//! Conversion error types.

use std::path::{Path, PathBuf};

use simtab_io::IoError;
use simtab_resample::ResampleError;
use simtab_signal::SignalError;

/// Errors that can occur during a conversion.
///
/// Every lower-level error is mapped onto one of these kinds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// The request failed validation before any source was touched.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// The source could not be opened or its container decoded.
    #[error("source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    /// Requested names that the source does not have.
    #[error(
        "{} name(s) not found: [{}]; available: [{}]",
        missing.len(),
        missing.join(", "),
        available.join(", ")
    )]
    NameNotFound {
        /// Missing names, in request order.
        missing: Vec<String>,
        /// Names the source offers, in source order.
        available: Vec<String>,
    },

    /// Data that cannot form a valid signal or table.
    #[error("malformed signal: {reason}")]
    MalformedSignal { reason: String },

    /// Interpolation produced or was asked for a non-finite value.
    #[error("interpolation domain error: {reason}")]
    InterpolationDomainError { reason: String },

    /// The output file could not be written.
    #[error("cannot write {}: {reason}", path.display())]
    WriteFailure { path: PathBuf, reason: String },
}

impl ConversionError {
    /// Maps an error from the table writer, attributing it to `path`.
    pub(crate) fn from_write(e: IoError, path: &Path) -> Self {
        match e {
            IoError::NonFiniteValue { .. } | IoError::Signal(_) => Self::MalformedSignal {
                reason: e.to_string(),
            },
            IoError::Write { path, reason } => Self::WriteFailure { path, reason },
            other => Self::WriteFailure {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<IoError> for ConversionError {
    fn from(e: IoError) -> Self {
        match e {
            IoError::NameNotFound { missing, available } => Self::NameNotFound { missing, available },
            IoError::Write { path, reason } => Self::WriteFailure { path, reason },
            IoError::InvalidBlockName { .. } => Self::WriteFailure {
                path: PathBuf::new(),
                reason: e.to_string(),
            },
            IoError::Csv { .. }
            | IoError::InvalidTime { .. }
            | IoError::Malformed { .. }
            | IoError::Signal(_)
            | IoError::NonFiniteValue { .. } => Self::MalformedSignal {
                reason: e.to_string(),
            },
            // Missing file, unreadable or undecodable container.
            _ => Self::SourceUnavailable {
                reason: e.to_string(),
            },
        }
    }
}

impl From<ResampleError> for ConversionError {
    fn from(e: ResampleError) -> Self {
        match e {
            ResampleError::Domain { .. } => Self::InterpolationDomainError {
                reason: e.to_string(),
            },
            ResampleError::DuplicateTime { .. } | ResampleError::Signal(_) => {
                Self::MalformedSignal {
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl From<SignalError> for ConversionError {
    fn from(e: SignalError) -> Self {
        match e {
            SignalError::InvalidGrid { .. } => Self::InvalidRequest {
                reason: e.to_string(),
            },
            other => Self::MalformedSignal {
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_not_found_keeps_lists() {
        let err: ConversionError = IoError::NameNotFound {
            missing: vec!["Z".into()],
            available: vec!["A".into(), "B".into(), "C".into()],
        }
        .into();
        assert_eq!(
            err,
            ConversionError::NameNotFound {
                missing: vec!["Z".into()],
                available: vec!["A".into(), "B".into(), "C".into()],
            }
        );
        assert_eq!(err.to_string(), "1 name(s) not found: [Z]; available: [A, B, C]");
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let err: ConversionError = IoError::FileNotFound {
            path: PathBuf::from("out.csv"),
        }
        .into();
        assert!(matches!(err, ConversionError::SourceUnavailable { .. }));
        assert!(err.to_string().contains("out.csv"));
    }

    #[test]
    fn duplicate_time_is_malformed() {
        let err: ConversionError = SignalError::NonIncreasingTime {
            name: "x".into(),
            index: 1,
            previous: 5.0,
            current: 5.0,
        }
        .into();
        assert!(matches!(err, ConversionError::MalformedSignal { .. }));

        let err: ConversionError = ResampleError::DuplicateTime {
            name: "x".into(),
            index: 1,
            time: 5.0,
        }
        .into();
        assert!(matches!(err, ConversionError::MalformedSignal { .. }));
    }

    #[test]
    fn domain_error_maps_to_interpolation() {
        let err: ConversionError = ResampleError::Domain {
            name: "x".into(),
            time: f64::NAN,
            reason: "query time is not finite".into(),
        }
        .into();
        assert!(matches!(err, ConversionError::InterpolationDomainError { .. }));
    }

    #[test]
    fn writer_errors() {
        let path = Path::new("out.txt");
        let err = ConversionError::from_write(
            IoError::InvalidBlockName {
                name: "a b".into(),
                reason: "name contains whitespace",
            },
            path,
        );
        assert!(matches!(err, ConversionError::WriteFailure { ref path, .. } if path == Path::new("out.txt")));

        let err = ConversionError::from_write(
            IoError::NonFiniteValue {
                block: "combined".into(),
                row: 0,
                col: 1,
                value: f64::NAN,
            },
            path,
        );
        assert!(matches!(err, ConversionError::MalformedSignal { .. }));
    }
}
