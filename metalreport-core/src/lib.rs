//! metalreport-core: pipeline for the GPI metal fabrication report
//!
//! This library reads a fabrication-tracking spreadsheet, cleans it up,
//! applies BM and description filters and aggregates weights and unit counts
//! into the figures the progress report shows.

pub mod aggregate;
pub mod clean;
pub mod columns;
pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod reader;
pub mod report;

use std::path::Path;

pub use config::ReportConfig;
pub use error::LoadError;
pub use filter::FilterSelection;
pub use reader::{Table, Value};
pub use report::Report;

/// Main report interface
pub struct ReportEngine {
    config: ReportConfig,
}

impl ReportEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self::with_config(ReportConfig::default())
    }

    /// Create an engine with custom configuration
    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Read a spreadsheet and build the full report from it.
    pub fn build_report<P: AsRef<Path>>(
        &self,
        path: P,
        selection: &FilterSelection,
    ) -> Result<Report, LoadError> {
        let path = path.as_ref();
        let (table, sheet) = reader::read_table(path, self.config.sheet.as_deref())?;
        let table = clean::clean(table);
        Ok(report::build(
            table,
            selection,
            self.config.top,
            &path.display().to_string(),
            &sheet,
        ))
    }
}

impl Default for ReportEngine {
    fn default() -> Self {
        Self::new()
    }
}
