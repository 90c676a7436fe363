//! Convert command: one source into one table file.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use simtab_convert::{ConversionSummary, convert};
use simtab_io::open_source;

use crate::cli::ConvertArgs;
use crate::config::SimtabConfig;
use crate::convert::{Job, build_job};

/// Run a single conversion from the top-level config settings.
pub fn run(args: ConvertArgs) -> Result<()> {
    let config = SimtabConfig::load(&args.config)?;
    let job = build_job(
        &config,
        args.source.as_deref(),
        args.output.as_deref(),
        args.step_size,
        args.final_time,
    )?;
    let summary = run_job(&job)?;
    println!(
        "wrote {} ({} block(s), {} row(s), {} variable(s))",
        summary.output_path.display(),
        summary.blocks,
        summary.rows,
        summary.variables
    );
    Ok(())
}

/// Opens the job's source and converts it.
pub fn run_job(job: &Job) -> Result<ConversionSummary> {
    let _span = info_span!("convert", case = job.name.as_str()).entered();
    info!(source = %job.source.display(), format = %job.format, "opening source");
    let source = open_source(&job.source, job.format)
        .with_context(|| format!("failed to open source: {}", job.source.display()))?;
    convert(&job.request, source.as_ref())
        .with_context(|| format!("conversion of {} failed", job.source.display()))
}
