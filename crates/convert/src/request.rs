//! Conversion request.

use std::path::{Path, PathBuf};

use simtab_signal::TimeGrid;
use tracing::warn;

use crate::error::ConversionError;

/// Default block name of the combined layout.
pub const DEFAULT_TABLE_NAME: &str = "combined";

/// How time-indexed variables are laid out in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableLayout {
    /// One block: time in column 0, one column per variable.
    #[default]
    Combined,
    /// One `(time, value)` block per variable, named after it.
    PerVariable,
}

/// Everything one conversion needs besides the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    selected_names: Vec<String>,
    grid: Option<TimeGrid>,
    output_path: PathBuf,
    layout: TableLayout,
    table_name: String,
    column_comments: bool,
}

impl ConversionRequest {
    /// Creates a request for `names`, written to `output_path`.
    ///
    /// Repeated names are dropped, keeping the first occurrence.
    pub fn new<I, S>(names: I, output_path: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selected_names: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if selected_names.contains(&name) {
                warn!(name = name.as_str(), "dropping repeated output name");
            } else {
                selected_names.push(name);
            }
        }
        Self {
            selected_names,
            grid: None,
            output_path: output_path.into(),
            layout: TableLayout::default(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            column_comments: false,
        }
    }

    /// Resamples every variable onto `grid`.
    pub fn with_grid(mut self, grid: TimeGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Sets the output layout.
    pub fn with_layout(mut self, layout: TableLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the block name used by the combined layout.
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    /// Enables `#Column i: name` comment lines.
    pub fn with_column_comments(mut self, enabled: bool) -> Self {
        self.column_comments = enabled;
        self
    }

    /// Names to export, in column order.
    pub fn selected_names(&self) -> &[String] {
        &self.selected_names
    }

    /// Resampling grid, if any.
    pub fn grid(&self) -> Option<&TimeGrid> {
        self.grid.as_ref()
    }

    /// Destination of the table file.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Output layout.
    pub fn layout(&self) -> TableLayout {
        self.layout
    }

    /// Block name used by the combined layout.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Whether `#Column i: name` lines are written.
    pub fn column_comments(&self) -> bool {
        self.column_comments
    }

    /// Checks the request before any source is opened.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidRequest`] if no name is selected,
    /// a name is empty, or the output path is empty.
    pub fn validate(&self) -> Result<(), ConversionError> {
        let mut problems: Vec<String> = Vec::new();
        if self.selected_names.is_empty() {
            problems.push("no output names selected".to_string());
        }
        if self.selected_names.iter().any(|n| n.is_empty()) {
            problems.push("output names must not be empty".to_string());
        }
        if self.output_path.as_os_str().is_empty() {
            problems.push("output path is empty".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConversionError::InvalidRequest {
                reason: problems.join("; "),
            })
        }
    }
}
