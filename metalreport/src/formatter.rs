//! Output formatters for the assembled report

use anyhow::Result;
use colored::*;
use metalreport_core::Report;
use metalreport_core::format::{PLACEHOLDER, format_br, percent_br};
use metalreport_core::report::{DetailTable, KpiBlock, RateSeries, Series, TopRanking};

const BAR_WIDTH: usize = 30;

/// Print the report in human-readable format with colors
pub fn print_human(report: &Report, decimals: usize) {
    println!("{}", report.title.bold());
    println!(
        "{}",
        format!(
            "{} · {} · {} de {} linhas",
            report.source.path,
            report.source.sheet,
            report.source.rows_selected,
            report.source.rows_loaded
        )
        .bright_black()
    );

    let mut active = Vec::new();
    if !report.filters.selected_bm.is_empty() {
        active.push(format!("Nº BM = {}", report.filters.selected_bm.join(", ")));
    }
    if !report.filters.selected_descriptions.is_empty() {
        active.push(format!(
            "DESCRIÇÃO = {}",
            report.filters.selected_descriptions.join(", ")
        ));
    }
    if !active.is_empty() {
        println!("{} {}", "Filtros:".bold(), active.join(" | "));
    }
    println!();

    print_kpis(&report.kpis, decimals);
    print_series(&report.by_bm, decimals);
    print_series(&report.cumulative, decimals);
    print_rates(&report.installation_rate);
    print_top(&report.top_descriptions, decimals);
    print_detail(&report.detail);
}

fn print_kpis(kpis: &KpiBlock, decimals: usize) {
    println!("{}", "Totais (KG)".bold().underline());
    println!(
        "  {} {}",
        "Desmontada:".red(),
        format_br(kpis.weight_kg.desmontada, decimals)
    );
    println!(
        "  {} {}",
        "Fabricada:".blue(),
        format_br(kpis.weight_kg.fabricada, decimals)
    );
    println!(
        "  {} {}",
        "Implantada:".green(),
        format_br(kpis.weight_kg.implantada, decimals)
    );
    println!();

    println!("{}", "Totais (UN)".bold().underline());
    println!(
        "  {} {}",
        "Desmontada:".red(),
        format_br(kpis.units.desmontada, 0)
    );
    println!(
        "  {} {}",
        "Fabricada:".blue(),
        format_br(kpis.units.fabricada, 0)
    );
    println!(
        "  {} {}",
        "Implantada:".green(),
        format_br(kpis.units.implantada, 0)
    );
    println!();

    println!(
        "{} {}",
        "Taxa de Implantação:".bold(),
        percent_br(kpis.installation_rate).bold()
    );
    println!();
}

fn print_series(series: &Series, decimals: usize) {
    println!("{}", series.title.bold().underline());

    let key_width = series
        .rows
        .iter()
        .map(|row| row.key.chars().count())
        .chain([series.key_label.chars().count()])
        .max()
        .unwrap_or(0);
    let cells: Vec<Vec<String>> = series
        .rows
        .iter()
        .map(|row| row.values.iter().map(|v| format_br(*v, decimals)).collect())
        .collect();
    let widths: Vec<usize> = series
        .measures
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain([name.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut header = format!("  {:<key_width$}", series.key_label);
    for (name, &width) in series.measures.iter().zip(&widths) {
        header.push_str(&format!("  {name:>width$}"));
    }
    println!("{}", header.bright_black());

    for (row, row_cells) in series.rows.iter().zip(&cells) {
        print!("  {:<key_width$}", row.key);
        for (cell, &width) in row_cells.iter().zip(&widths) {
            print!("  {cell:>width$}");
        }
        println!();
    }
    println!();
}

fn print_rates(rates: &RateSeries) {
    println!("{}", rates.title.bold().underline());

    let key_width = rates
        .rows
        .iter()
        .map(|point| point.key.chars().count())
        .max()
        .unwrap_or(0);
    for point in &rates.rows {
        let shown = match point.ratio {
            Some(ratio) => percent_br(ratio),
            None => PLACEHOLDER.to_string(),
        };
        println!("  {:<key_width$}  {}", point.key, shown);
    }
    println!();
}

fn print_top(top: &TopRanking, decimals: usize) {
    println!("{}", top.title.bold().underline());

    let max = top.rows.iter().map(|r| r.total).fold(0.0_f64, f64::max);
    let name_width = top
        .rows
        .iter()
        .map(|r| r.description.chars().count())
        .max()
        .unwrap_or(0);
    for entry in &top.rows {
        println!(
            "  {:<name_width$}  {} {}",
            entry.description,
            bar(entry.total, max).green(),
            format_br(entry.total, decimals)
        );
    }
    println!();
}

fn print_detail(detail: &DetailTable) {
    println!("{}", "Detalhamento".bold().underline());

    let widths: Vec<usize> = detail
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            detail
                .rows
                .iter()
                .map(|row| row[i].chars().count())
                .chain([name.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut header = String::from(" ");
    for (name, &width) in detail.columns.iter().zip(&widths) {
        header.push_str(&format!("  {name:<width$}"));
    }
    println!("{}", header.bright_black());

    for row in &detail.rows {
        print!(" ");
        for (cell, &width) in row.iter().zip(&widths) {
            print!("  {cell:<width$}");
        }
        println!();
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len)
}

/// Print the filter values the spreadsheet offers, one per line
pub fn print_filter_options(report: &Report) {
    println!("{}", "Nº BM".bold());
    for value in &report.filters.bm_options {
        println!("  {value}");
    }
    println!();
    println!("{}", "DESCRIÇÃO".bold());
    for value in &report.filters.description_options {
        println!("  {value}");
    }
}

/// Print the report as pretty JSON
pub fn print_json(report: &Report) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
