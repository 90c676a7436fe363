//! Resampling of irregular signals onto a uniform [`TimeGrid`].
//!
//! Every output signal shares the grid's time base, which is what the
//! table writer needs to store all variables as columns of one matrix.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  Signal(s)    │────▶│  sample_at      │────▶│  Signal on grid  │
//!  │  (any rate)   │     │  (bisect+lerp)  │     │  (grid.len() pts)│
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! Edge policy: grid times before the first sample hold the first value,
//! grid times after the last sample hold the last value, and a grid time
//! equal to a sample time returns that sample's value unchanged.
//!
//! # Quick start
//!
//! ```ignore
//! use simtab_resample::resample;
//! use simtab_signal::{Signal, TimeGrid};
//!
//! let s = Signal::new("Zone1T", vec![0.0, 1800.0, 3600.0], vec![20.0, 20.5, 21.0])?;
//! let grid = TimeGrid::new(900.0, 3600.0)?;
//! let out = resample(&[s], &grid)?;
//! assert_eq!(out[0].values(), &[20.0, 20.25, 20.5, 20.75, 21.0]);
//! ```

mod error;
mod interpolate;
mod resample;

pub use error::ResampleError;
pub use interpolate::sample_at;
pub use resample::{resample, resample_signal};
pub use simtab_signal::{Signal, TimeGrid};
