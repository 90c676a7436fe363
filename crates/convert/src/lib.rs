//! # simtab-convert
//!
//! Turn named variables from a simulation output into a lookup-table file.
//!
//! ```mermaid
//! flowchart LR
//!     R[ConversionRequest] --> V{validate}
//!     V --> S[SourceReader::read]
//!     S -->|grid| G[resample]
//!     S -->|no grid| L[layout]
//!     G --> L
//!     L --> W[write_table]
//! ```
//!
//! [`convert`] is the only entry point; it either writes the whole file or
//! leaves the destination untouched.

mod error;
mod pipeline;
mod request;

pub use error::ConversionError;
pub use pipeline::{ConversionSummary, convert};
pub use request::{ConversionRequest, DEFAULT_TABLE_NAME, TableLayout};
