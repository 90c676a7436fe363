use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Simulation output to lookup-table converter.
#[derive(Parser)]
#[command(
    name = "simtab",
    version,
    about = "Convert simulation output into lookup-table text files"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Convert one source into a table file.
    Convert(ConvertArgs),
    /// Convert every `[[case]]` of a config in parallel.
    Batch(BatchArgs),
    /// List the blocks of a written table file.
    Inspect(InspectArgs),
    /// Print the names a source can export.
    List(ListArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "simtab.toml")]
    pub config: PathBuf,

    /// Override the source path from config.
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Override the output path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the grid step size (seconds).
    #[arg(long)]
    pub step_size: Option<f64>,

    /// Override the grid final time (seconds).
    #[arg(long)]
    pub final_time: Option<f64>,
}

/// Arguments for the `batch` subcommand.
#[derive(clap::Args)]
pub struct BatchArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "simtab.toml")]
    pub config: PathBuf,

    /// Worker threads (0 uses one per core).
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}

/// Arguments for the `inspect` subcommand.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Table file to read.
    pub path: PathBuf,
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args)]
pub struct ListArgs {
    /// Source file to open.
    pub path: PathBuf,

    /// Source format (auto, csv, parquet, mat, dymola, netcdf, table).
    #[arg(short, long, default_value = "auto")]
    pub format: String,
}
