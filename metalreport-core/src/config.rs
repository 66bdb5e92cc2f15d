//! TOML configuration for the report pipeline

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::columns;
use crate::filter::FilterSelection;

/// Spreadsheet consumed when neither the CLI nor the config names one.
pub const DEFAULT_SOURCE: &str = "relatorio_metal.xlsx";

/// Report configuration, usually loaded from `metalreport.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Spreadsheet to read when the CLI does not name one.
    #[serde(default)]
    pub source: Option<PathBuf>,
    /// Worksheet to read; the first sheet when absent.
    #[serde(default)]
    pub sheet: Option<String>,
    /// Decimal places for KG figures in the terminal output.
    #[serde(default = "default_decimals")]
    pub decimals: usize,
    /// How many descriptions the ranking keeps.
    #[serde(default = "default_top")]
    pub top: usize,
    #[serde(default)]
    pub filters: FiltersConfig,
}

/// Pre-selected filter values, matched against cell text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FiltersConfig {
    #[serde(default)]
    pub bm: Vec<String>,
    #[serde(default)]
    pub description: Vec<String>,
}

fn default_decimals() -> usize {
    2
}

fn default_top() -> usize {
    10
}

impl ReportConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ReportConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// The filter selection these settings describe.
    pub fn selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::new();
        selection.accept(columns::BM, self.filters.bm.iter().cloned());
        selection.accept(columns::DESCRIPTION, self.filters.description.iter().cloned());
        selection
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source: None,
            sheet: None,
            decimals: default_decimals(),
            top: default_top(),
            filters: FiltersConfig::default(),
        }
    }
}
