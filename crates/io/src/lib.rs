//! # simtab-io
//!
//! Read named variables out of simulation outputs and write them as
//! numeric table files.
//!
//! ```text
//! CSV / Parquet ─► ColumnTableReader ──┐
//! MAT v4 ────────► MatFileReader ──────┤
//! Dymola .mat ───► DymolaResultReader ─┼─► SourceData ─► (caller) ─► write_table
//! NetCDF ────────► NetcdfReader ───────┤
//! table file ────► TableFileReader ────┘
//! ```
//!
//! Every reader implements [`SourceReader`]; [`open_source`] picks one from
//! a [`SourceFormat`].

mod column_table;
mod csv_read;
mod dymola;
mod eplus_time;
mod error;
mod mat4;
mod mat_read;
#[cfg(feature = "netcdf")]
mod netcdf_read;
mod parquet_read;
mod reader;
mod source;
mod table_format;
mod table_read;
mod writer;

pub use column_table::{ColumnFormat, ColumnTableReader};
pub use dymola::DymolaResultReader;
pub use error::IoError;
pub use mat_read::MatFileReader;
#[cfg(feature = "netcdf")]
pub use netcdf_read::NetcdfReader;
pub use reader::{SourceFormat, detect_format, open_source};
pub use source::{MemorySource, SourceData, SourceReader, ensure_names};
pub use table_format::{TableBlock, format_value, render_table, validate_block_name};
pub use table_read::{TableFileReader, parse_table, read_table};
pub use writer::{TableSummary, WriterConfig, write_table};
