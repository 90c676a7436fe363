mod batch_cmd;
mod cli;
mod config;
mod convert;
mod convert_cmd;
mod inspect_cmd;
mod list_cmd;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Convert(args) => convert_cmd::run(args),
        Command::Batch(args) => batch_cmd::run(args),
        Command::Inspect(args) => inspect_cmd::run(args),
        Command::List(args) => list_cmd::run(args),
    }
}
