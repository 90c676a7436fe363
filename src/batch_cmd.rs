//! Batch command: every `[[case]]` of a config, converted in parallel.

use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{error, info};

use crate::cli::BatchArgs;
use crate::config::SimtabConfig;
use crate::convert::{Job, build_case_job};
use crate::convert_cmd::run_job;

/// Run all batch cases; a failing case does not stop the others.
pub fn run(args: BatchArgs) -> Result<()> {
    let config = SimtabConfig::load(&args.config)?;
    if config.cases.is_empty() {
        bail!("no [[case]] entries in {}", args.config.display());
    }
    let jobs = config
        .cases
        .iter()
        .map(|case| build_case_job(&config, case))
        .collect::<Result<Vec<_>>>()?;
    check_unique_outputs(&jobs)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs)
        .build()
        .context("failed to build thread pool")?;
    info!(n_cases = jobs.len(), threads = pool.current_num_threads(), "running batch");

    let results: Vec<Result<_>> = pool.install(|| jobs.par_iter().map(run_job).collect());

    let mut n_failed = 0;
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(summary) => println!(
                "{}: wrote {} ({} block(s), {} row(s))",
                job.name,
                summary.output_path.display(),
                summary.blocks,
                summary.rows
            ),
            Err(e) => {
                n_failed += 1;
                error!(case = job.name.as_str(), "{e:#}");
                eprintln!("{}: {e:#}", job.name);
            }
        }
    }
    if n_failed > 0 {
        bail!("{n_failed} of {} case(s) failed", jobs.len());
    }
    Ok(())
}

/// Two cases writing the same file would race on the rename.
fn check_unique_outputs(jobs: &[Job]) -> Result<()> {
    let mut seen = HashSet::new();
    for job in jobs {
        if !seen.insert(job.request.output_path()) {
            bail!(
                "case '{}' writes {} which another case also writes",
                job.name,
                job.request.output_path().display()
            );
        }
    }
    Ok(())
}
