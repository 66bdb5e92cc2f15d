use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use metalreport_core::config::DEFAULT_SOURCE;
use metalreport_core::{FilterSelection, ReportConfig, ReportEngine, columns};
use std::path::PathBuf;

mod formatter;

#[derive(Parser)]
#[command(name = "metalreport")]
#[command(about = "Fabrication progress report from a metal tracking spreadsheet", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the Excel/ODS file to report on
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Keep only these BM numbers (repeatable)
    #[arg(long, value_name = "BM")]
    bm: Vec<String>,

    /// Keep only these part descriptions (repeatable)
    #[arg(short, long = "description", value_name = "DESC")]
    descriptions: Vec<String>,

    /// Worksheet to read instead of the first one
    #[arg(short, long, value_name = "SHEET")]
    sheet: Option<String>,

    /// How many descriptions the ranking keeps
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// List the available filter values and exit
    #[arg(long)]
    list_filters: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for downstream tooling
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        ReportConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("metalreport.toml");
        if default_config_path.exists() {
            ReportConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            ReportConfig::default()
        }
    };

    if let Some(sheet) = cli.sheet {
        config.sheet = Some(sheet);
    }
    if let Some(top) = cli.top {
        config.top = top;
    }

    // CLI filter values replace the configured ones for the same field.
    let mut selection = FilterSelection::new();
    let bm = if cli.bm.is_empty() {
        &config.filters.bm
    } else {
        &cli.bm
    };
    let descriptions = if cli.descriptions.is_empty() {
        &config.filters.description
    } else {
        &cli.descriptions
    };
    selection.accept(columns::BM, bm.iter().cloned());
    selection.accept(columns::DESCRIPTION, descriptions.iter().cloned());

    let file = cli
        .file
        .or_else(|| config.source.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));

    let engine = ReportEngine::with_config(config);
    let report = engine
        .build_report(&file, &selection)
        .with_context(|| format!("Failed to build report from {}", file.display()))?;

    if cli.list_filters {
        formatter::print_filter_options(&report);
        return Ok(());
    }

    match cli.format {
        OutputFormat::Human => {
            formatter::print_human(&report, engine.config().decimals);
        }
        OutputFormat::Json => {
            formatter::print_json(&report)?;
        }
    }

    Ok(())
}
