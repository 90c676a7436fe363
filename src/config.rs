use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level simtab configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimtabConfig {
    /// Grid step in seconds. Set together with `final_time` or not at all.
    #[serde(default)]
    pub step_size: Option<f64>,

    /// Last grid point in seconds.
    #[serde(default)]
    pub final_time: Option<f64>,

    /// Variables to export, in column order.
    #[serde(default)]
    pub output_list: Vec<String>,

    /// Where the simulation output lives.
    #[serde(default)]
    pub source: SourceToml,

    /// Where and how the table file is written.
    #[serde(default)]
    pub output: OutputToml,

    /// Batch cases; each may override the settings above.
    #[serde(default, rename = "case")]
    pub cases: Vec<CaseToml>,
}

impl SimtabConfig {
    /// Reads and parses a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceToml {
    pub path: Option<PathBuf>,
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for SourceToml {
    fn default() -> Self {
        Self {
            path: None,
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "auto".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    pub path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub combined_table: bool,
    #[serde(default = "default_table_name")]
    pub table_name: String,
    #[serde(default)]
    pub column_comments: bool,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            path: None,
            combined_table: true,
            table_name: default_table_name(),
            column_comments: false,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_table_name() -> String {
    simtab_convert::DEFAULT_TABLE_NAME.to_string()
}

/// One `[[case]]` entry of a batch run.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseToml {
    pub name: String,
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub output_list: Option<Vec<String>>,
    pub step_size: Option<f64>,
    pub final_time: Option<f64>,
}
