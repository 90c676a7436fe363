//! List command: the names a source can export.

use anyhow::{Context, Result};

use simtab_io::open_source;

use crate::cli::ListArgs;
use crate::convert::parse_source_format;

pub fn run(args: ListArgs) -> Result<()> {
    let format = parse_source_format(&args.format)?;
    let source = open_source(&args.path, format)
        .with_context(|| format!("failed to open source: {}", args.path.display()))?;
    let names = source
        .available_names()
        .with_context(|| format!("failed to list names in {}", args.path.display()))?;
    for name in names {
        println!("{name}");
    }
    Ok(())
}
