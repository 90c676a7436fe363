//! Pure conversion functions: TOML config structs -> crate API types.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};

use simtab_convert::{ConversionRequest, TableLayout};
use simtab_io::SourceFormat;
use simtab_signal::TimeGrid;

use crate::config::{CaseToml, SimtabConfig};

/// Parses a source format name into the corresponding enum variant.
pub fn parse_source_format(s: &str) -> Result<SourceFormat> {
    s.parse::<SourceFormat>().map_err(|e| anyhow!(e))
}

/// Builds the resampling grid.
///
/// Both values set gives a grid, neither gives `None`.
pub fn build_grid(step_size: Option<f64>, final_time: Option<f64>) -> Result<Option<TimeGrid>> {
    match (step_size, final_time) {
        (Some(step), Some(final_time)) => TimeGrid::new(step, final_time)
            .map(Some)
            .context("invalid resampling grid"),
        (None, None) => Ok(None),
        (Some(_), None) => bail!("step_size is set but final_time is not"),
        (None, Some(_)) => bail!("final_time is set but step_size is not"),
    }
}

/// Builds a [`ConversionRequest`] from the config, the grid and the names.
pub fn build_request(
    config: &SimtabConfig,
    names: &[String],
    grid: Option<TimeGrid>,
    output: PathBuf,
) -> ConversionRequest {
    let layout = if config.output.combined_table {
        TableLayout::Combined
    } else {
        TableLayout::PerVariable
    };
    let mut request = ConversionRequest::new(names.iter().cloned(), output)
        .with_layout(layout)
        .with_table_name(&config.output.table_name)
        .with_column_comments(config.output.column_comments);
    if let Some(grid) = grid {
        request = request.with_grid(grid);
    }
    request
}

/// A fully resolved unit of work: where to read and what to write.
#[derive(Debug)]
pub struct Job {
    pub name: String,
    pub source: PathBuf,
    pub format: SourceFormat,
    pub request: ConversionRequest,
}

/// Resolves the top-level settings into a job, applying CLI overrides.
pub fn build_job(
    config: &SimtabConfig,
    source: Option<&Path>,
    output: Option<&Path>,
    step_size: Option<f64>,
    final_time: Option<f64>,
) -> Result<Job> {
    let source = source
        .or(config.source.path.as_deref())
        .ok_or_else(|| anyhow!("no source path: set [source].path in config or use --source"))?;
    let output = output
        .or(config.output.path.as_deref())
        .ok_or_else(|| anyhow!("no output path: set [output].path in config or use --output"))?;
    // A CLI override replaces the whole pair so partial overrides are caught.
    let grid = if step_size.is_some() || final_time.is_some() {
        build_grid(step_size, final_time)?
    } else {
        build_grid(config.step_size, config.final_time)?
    };
    Ok(Job {
        name: "main".to_string(),
        source: source.to_path_buf(),
        format: parse_source_format(&config.source.format)?,
        request: build_request(config, &config.output_list, grid, output.to_path_buf()),
    })
}

/// Resolves one `[[case]]` against the top-level settings.
pub fn build_case_job(config: &SimtabConfig, case: &CaseToml) -> Result<Job> {
    let source = case
        .source
        .as_deref()
        .or(config.source.path.as_deref())
        .ok_or_else(|| anyhow!("case '{}': no source path", case.name))?;
    let output = case
        .output
        .as_deref()
        .or(config.output.path.as_deref())
        .ok_or_else(|| anyhow!("case '{}': no output path", case.name))?;
    let grid = if case.step_size.is_some() || case.final_time.is_some() {
        build_grid(case.step_size, case.final_time)
    } else {
        build_grid(config.step_size, config.final_time)
    }
    .with_context(|| format!("case '{}'", case.name))?;
    let names = case.output_list.as_deref().unwrap_or(&config.output_list);
    Ok(Job {
        name: case.name.clone(),
        source: source.to_path_buf(),
        format: parse_source_format(&config.source.format)?,
        request: build_request(config, names, grid, output.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(text: &str) -> SimtabConfig {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn parses_formats() {
        assert_eq!(parse_source_format("auto").unwrap(), SourceFormat::Auto);
        assert_eq!(parse_source_format("csv").unwrap(), SourceFormat::Csv);
        assert_eq!(parse_source_format("dymola").unwrap(), SourceFormat::Dymola);
        assert!(parse_source_format("xlsx").is_err());
    }

    #[test]
    fn grid_needs_both_values() {
        assert!(build_grid(None, None).unwrap().is_none());
        let grid = build_grid(Some(600.0), Some(3600.0)).unwrap().unwrap();
        assert_eq!(grid.len(), 7);
        assert!(build_grid(Some(600.0), None).is_err());
        assert!(build_grid(None, Some(3600.0)).is_err());
        assert!(build_grid(Some(0.0), Some(3600.0)).is_err());
    }

    #[test]
    fn job_from_top_level() {
        let cfg = config(
            r#"
            step_size = 600.0
            final_time = 3600.0
            output_list = ["OAT", "Zone1T"]
            [source]
            path = "eplusout.csv"
            [output]
            path = "eplus.mos"
            table_name = "EnergyPlus"
            "#,
        );
        let job = build_job(&cfg, None, None, None, None).unwrap();
        assert_eq!(job.source, Path::new("eplusout.csv"));
        assert_eq!(job.format, SourceFormat::Auto);
        assert_eq!(job.request.selected_names(), ["OAT", "Zone1T"]);
        assert_eq!(job.request.output_path(), Path::new("eplus.mos"));
        assert_eq!(job.request.table_name(), "EnergyPlus");
        assert_eq!(job.request.layout(), TableLayout::Combined);
        assert_eq!(job.request.grid().map(TimeGrid::len), Some(7));
    }

    #[test]
    fn cli_overrides_win() {
        let cfg = config(
            r#"
            step_size = 600.0
            final_time = 3600.0
            output_list = ["OAT"]
            [source]
            path = "a.csv"
            [output]
            path = "a.mos"
            combined_table = false
            "#,
        );
        let job = build_job(
            &cfg,
            Some(Path::new("b.csv")),
            Some(Path::new("b.mos")),
            Some(60.0),
            Some(120.0),
        )
        .unwrap();
        assert_eq!(job.source, Path::new("b.csv"));
        assert_eq!(job.request.output_path(), Path::new("b.mos"));
        assert_eq!(job.request.layout(), TableLayout::PerVariable);
        assert_eq!(job.request.grid().map(TimeGrid::len), Some(3));

        assert!(build_job(&cfg, None, None, Some(60.0), None).is_err());
    }

    #[test]
    fn missing_paths_are_reported() {
        let cfg = config("output_list = [\"OAT\"]");
        let err = build_job(&cfg, None, None, None, None).unwrap_err();
        assert!(err.to_string().contains("no source path"));
        let err = build_job(&cfg, Some(Path::new("a.csv")), None, None, None).unwrap_err();
        assert!(err.to_string().contains("no output path"));
    }

    #[test]
    fn case_overrides_top_level() {
        let cfg = config(
            r#"
            step_size = 600.0
            final_time = 3600.0
            output_list = ["OAT", "Zone1T"]
            [source]
            path = "base.csv"
            [[case]]
            name = "c1"
            output = "c1.mos"
            [[case]]
            name = "c2"
            source = "c2.csv"
            output = "c2.mos"
            output_list = ["OAT"]
            step_size = 1800.0
            final_time = 3600.0
            [[case]]
            name = "c3"
            "#,
        );
        let c1 = build_case_job(&cfg, &cfg.cases[0]).unwrap();
        assert_eq!(c1.name, "c1");
        assert_eq!(c1.source, Path::new("base.csv"));
        assert_eq!(c1.request.selected_names(), ["OAT", "Zone1T"]);
        assert_eq!(c1.request.grid().map(TimeGrid::len), Some(7));

        let c2 = build_case_job(&cfg, &cfg.cases[1]).unwrap();
        assert_eq!(c2.source, Path::new("c2.csv"));
        assert_eq!(c2.request.selected_names(), ["OAT"]);
        assert_eq!(c2.request.grid().map(TimeGrid::len), Some(3));

        let err = build_case_job(&cfg, &cfg.cases[2]).unwrap_err();
        assert!(err.to_string().contains("case 'c3'"));
    }
}
