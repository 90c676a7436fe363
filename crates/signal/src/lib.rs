//! # simtab-signal
//!
//! In-memory data model for the simtab conversion tools.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["source reader"] -->|"Signal::new()"| B["Signal"]
//!     A -->|"Matrix::new()"| C["Matrix"]
//!     D["TimeGrid::new()"] -->|".points()"| E["uniform times"]
//!     B -->|"resample"| F["Signal on grid"]
//!     F -->|"Matrix::from_columns()"| C
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use simtab_signal::{Matrix, Signal, TimeGrid};
//!
//! let oat = Signal::new("OAT", vec![0.0, 3600.0, 7200.0], vec![10.0, 12.0, 15.0])?;
//! let grid = TimeGrid::new(600.0, 604_800.0)?;
//! assert_eq!(grid.len(), 1009);
//!
//! let m = Matrix::from_rows("tab", &[vec![0.0, 1.0], vec![1.0, 2.0]])?;
//! assert_eq!((m.rows(), m.cols()), (2, 2));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `signal` | Named time series with strictly increasing times |
//! | `matrix` | Named row-major 2-D grid of `f64` |
//! | `grid` | Uniform time grid `0, step, 2*step, ...` |
//! | `error` | [`SignalError`] |

mod error;
mod grid;
mod matrix;
mod signal;

pub use error::SignalError;
pub use grid::TimeGrid;
pub use matrix::Matrix;
pub use signal::Signal;
