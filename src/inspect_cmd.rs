//! Inspect command: block names and shapes of a table file.

use anyhow::{Context, Result};

use simtab_io::read_table;

use crate::cli::InspectArgs;

pub fn run(args: InspectArgs) -> Result<()> {
    let blocks = read_table(&args.path)
        .with_context(|| format!("failed to read table file: {}", args.path.display()))?;
    for m in &blocks {
        println!("{}({}, {})", m.name(), m.rows(), m.cols());
    }
    Ok(())
}
