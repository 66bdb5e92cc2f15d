//! Report assembly: KPIs, per-BM series, ranking and the detail dump

use serde::Serialize;

use crate::aggregate::{self, AggregationRow, Measure, RatioPoint};
use crate::columns;
use crate::filter::{self, FilterSelection};
use crate::reader::Table;

pub const TITLE: &str = "Relatório de Metal GPI";

pub const SERIES_DISASSEMBLED: &str = "Desmontada";
pub const SERIES_FABRICATED: &str = "Fabricada";
pub const SERIES_INSTALLED: &str = "Implantada";

/// Chart color per series name, carried into the JSON payload so downstream
/// renderers keep the established palette.
pub const SERIES_COLORS: [(&str, &str); 3] = [
    (SERIES_DISASSEMBLED, "#EF553B"),
    (SERIES_FABRICATED, "#636EFA"),
    (SERIES_INSTALLED, "#00CC96"),
];

/// Everything the presenters need, fully computed.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub source: SourceSummary,
    pub filters: FilterSummary,
    pub kpis: KpiBlock,
    pub by_bm: Series,
    pub cumulative: Series,
    pub installation_rate: RateSeries,
    pub top_descriptions: TopRanking,
    pub detail: DetailTable,
}

/// Where the data came from and how much of it survived filtering.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub path: String,
    pub sheet: String,
    pub rows_loaded: usize,
    pub rows_selected: usize,
    pub screw_column: String,
}

/// Available filter options (from the unfiltered table) next to what was
/// actually selected.
#[derive(Debug, Clone, Serialize)]
pub struct FilterSummary {
    pub bm_options: Vec<String>,
    pub description_options: Vec<String>,
    pub selected_bm: Vec<String>,
    pub selected_descriptions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KpiBlock {
    pub weight_kg: KpiTriple,
    pub units: KpiTriple,
    /// Implantada over Desmontada weight; zero when nothing was dismantled.
    pub installation_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct KpiTriple {
    pub desmontada: f64,
    pub fabricada: f64,
    pub implantada: f64,
}

/// A grouped chart: one row per key, one value per measure.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub title: String,
    pub key_label: String,
    pub measures: Vec<String>,
    pub colors: Vec<String>,
    pub rows: Vec<AggregationRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RateSeries {
    pub title: String,
    pub rows: Vec<RatioPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopRanking {
    pub title: String,
    pub measure_label: String,
    pub rows: Vec<RankedEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub description: String,
    pub total: f64,
}

/// The selected rows as display strings, for the tabular appendix.
#[derive(Debug, Clone, Serialize)]
pub struct DetailTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Assemble the full report from a cleaned table.
///
/// Filter options are collected before filtering so a narrow selection still
/// shows every choice the file offers. All numeric work happens after the
/// expected fields are coerced, so text leftovers count as zero everywhere.
pub fn build(
    mut table: Table,
    selection: &FilterSelection,
    top_n: usize,
    path: &str,
    sheet: &str,
) -> Report {
    let screw_column = columns::ensure_screw_column(&mut table);
    let numeric_fields = columns::expected_numeric_fields(&screw_column);
    columns::coerce_numeric(&mut table, &numeric_fields);

    let bm_options = table.unique_strings(columns::BM);
    let description_options = table.unique_strings(columns::DESCRIPTION);
    let rows_loaded = table.len();

    let selected = filter::apply(&table, selection);

    let measures = vec![
        Measure::new(columns::WEIGHT_DISASSEMBLED, SERIES_DISASSEMBLED),
        Measure::new(columns::WEIGHT_FABRICATED, SERIES_FABRICATED),
        Measure::new(columns::WEIGHT_INSTALLED, SERIES_INSTALLED),
    ];
    let by_bm = aggregate::aggregate(&selected, columns::BM, &measures);
    let cumulative_rows = aggregate::cumulative(&by_bm);
    // Implantada (slot 2) over Desmontada (slot 0).
    let rate_rows = aggregate::ratio(&by_bm, 2, 0);
    let top_rows = aggregate::top_groups(
        &selected,
        columns::DESCRIPTION,
        columns::WEIGHT_INSTALLED,
        top_n,
    );

    Report {
        title: TITLE.to_string(),
        source: SourceSummary {
            path: path.to_string(),
            sheet: sheet.to_string(),
            rows_loaded,
            rows_selected: selected.len(),
            screw_column,
        },
        filters: FilterSummary {
            bm_options,
            description_options,
            selected_bm: selected_values(selection, columns::BM),
            selected_descriptions: selected_values(selection, columns::DESCRIPTION),
        },
        kpis: kpi_block(&selected),
        by_bm: series("Realizado por BM (KG)", &measures, by_bm),
        cumulative: series("Realizado Acumulado (KG)", &measures, cumulative_rows),
        installation_rate: RateSeries {
            title: "Taxa de Implantação por BM".to_string(),
            rows: rate_rows,
        },
        top_descriptions: TopRanking {
            title: format!("Top-{top_n} Descrições por Implantação (KG)"),
            measure_label: "KG Implantado".to_string(),
            rows: top_rows
                .into_iter()
                .map(|row| RankedEntry {
                    description: row.key,
                    total: row.values[0],
                })
                .collect(),
        },
        detail: detail_table(&selected),
    }
}

fn kpi_block(table: &Table) -> KpiBlock {
    let desmontada = table.sum_or_zero(columns::WEIGHT_DISASSEMBLED);
    let fabricada = table.sum_or_zero(columns::WEIGHT_FABRICATED);
    let implantada = table.sum_or_zero(columns::WEIGHT_INSTALLED);
    let installation_rate = if desmontada > 0.0 {
        implantada / desmontada
    } else {
        0.0
    };
    KpiBlock {
        weight_kg: KpiTriple {
            desmontada,
            fabricada,
            implantada,
        },
        units: KpiTriple {
            desmontada: table.sum_or_zero(columns::UNITS_DISASSEMBLED),
            fabricada: table.sum_or_zero(columns::UNITS_FABRICATED),
            implantada: table.sum_or_zero(columns::UNITS_INSTALLED),
        },
        installation_rate,
    }
}

fn series(title: &str, measures: &[Measure], rows: Vec<AggregationRow>) -> Series {
    Series {
        title: title.to_string(),
        key_label: columns::BM.to_string(),
        measures: measures.iter().map(|m| m.name.clone()).collect(),
        colors: measures
            .iter()
            .map(|m| color_for(&m.name).to_string())
            .collect(),
        rows,
    }
}

fn color_for(series_name: &str) -> &'static str {
    SERIES_COLORS
        .iter()
        .find(|(name, _)| *name == series_name)
        .map(|(_, color)| *color)
        .unwrap_or(SERIES_COLORS[2].1)
}

fn selected_values(selection: &FilterSelection, field: &str) -> Vec<String> {
    selection
        .accepted(field)
        .map(|set| set.iter().cloned().collect())
        .unwrap_or_default()
}

fn detail_table(table: &Table) -> DetailTable {
    DetailTable {
        columns: table.columns.clone(),
        rows: table
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Value;

    fn sample() -> Table {
        let columns = vec![
            "Nº BM".to_string(),
            "DESCRIÇÃO".to_string(),
            "FAB.".to_string(),
            "DESM.".to_string(),
            "MONT.".to_string(),
            "QTDE. FAB.".to_string(),
            "QTDE. DESM.".to_string(),
            "QTDE. MONT.".to_string(),
        ];
        let rows = vec![
            vec![
                Value::Number(10.0),
                Value::Text("VIGA W200".to_string()),
                Value::Number(50.0),
                Value::Number(100.0),
                Value::Number(40.0),
                Value::Number(5.0),
                Value::Number(8.0),
                Value::Number(4.0),
            ],
            vec![
                Value::Number(20.0),
                Value::Text("CHAPA PISO".to_string()),
                Value::Number(150.0),
                Value::Number(200.0),
                Value::Number(100.0),
                Value::Number(12.0),
                Value::Number(15.0),
                Value::Number(10.0),
            ],
            vec![
                Value::Number(10.0),
                Value::Text("GUARDA-CORPO".to_string()),
                Value::Number(0.0),
                Value::Number(0.0),
                Value::Number(0.0),
                Value::Number(0.0),
                Value::Number(0.0),
                Value::Number(0.0),
            ],
        ];
        Table::new(columns, rows)
    }

    #[test]
    fn kpis_sum_the_weight_and_unit_columns() {
        let report = build(sample(), &FilterSelection::new(), 10, "in.xlsx", "Plan1");
        assert_eq!(report.kpis.weight_kg.desmontada, 300.0);
        assert_eq!(report.kpis.weight_kg.fabricada, 200.0);
        assert_eq!(report.kpis.weight_kg.implantada, 140.0);
        assert_eq!(report.kpis.units.desmontada, 23.0);
        assert_eq!(report.kpis.units.fabricada, 17.0);
        assert_eq!(report.kpis.units.implantada, 14.0);
        assert!((report.kpis.installation_rate - 140.0 / 300.0).abs() < 1e-12);
    }

    #[test]
    fn installation_rate_is_zero_when_nothing_was_dismantled() {
        let mut table = sample();
        for row in &mut table.rows {
            row[3] = Value::Number(0.0);
        }
        let report = build(table, &FilterSelection::new(), 10, "in.xlsx", "Plan1");
        assert_eq!(report.kpis.installation_rate, 0.0);
    }

    #[test]
    fn by_bm_series_groups_and_cumulates() {
        let report = build(sample(), &FilterSelection::new(), 10, "in.xlsx", "Plan1");
        assert_eq!(report.by_bm.measures, vec![
            "Desmontada".to_string(),
            "Fabricada".to_string(),
            "Implantada".to_string(),
        ]);
        assert_eq!(report.by_bm.rows[0].key, "10");
        assert_eq!(report.by_bm.rows[0].values, vec![100.0, 50.0, 40.0]);
        assert_eq!(report.by_bm.rows[1].key, "20");
        assert_eq!(report.by_bm.rows[1].values, vec![200.0, 150.0, 100.0]);
        assert_eq!(report.cumulative.rows[1].values, vec![300.0, 200.0, 140.0]);
    }

    #[test]
    fn rate_series_divides_implantada_by_desmontada() {
        let report = build(sample(), &FilterSelection::new(), 10, "in.xlsx", "Plan1");
        assert_eq!(report.installation_rate.rows[0].ratio, Some(0.4));
        assert_eq!(report.installation_rate.rows[1].ratio, Some(0.5));
    }

    #[test]
    fn top_descriptions_rank_by_installed_weight() {
        let report = build(sample(), &FilterSelection::new(), 2, "in.xlsx", "Plan1");
        assert_eq!(report.top_descriptions.title, "Top-2 Descrições por Implantação (KG)");
        assert_eq!(report.top_descriptions.rows.len(), 2);
        assert_eq!(report.top_descriptions.rows[0].description, "CHAPA PISO");
        assert_eq!(report.top_descriptions.rows[0].total, 100.0);
        assert_eq!(report.top_descriptions.rows[1].description, "VIGA W200");
    }

    #[test]
    fn filter_options_come_from_the_unfiltered_table() {
        let mut selection = FilterSelection::new();
        selection.accept("Nº BM", ["10"]);
        let report = build(sample(), &selection, 10, "in.xlsx", "Plan1");
        assert_eq!(report.filters.bm_options, vec!["10", "20"]);
        assert_eq!(report.filters.selected_bm, vec!["10"]);
        assert_eq!(report.source.rows_loaded, 3);
        assert_eq!(report.source.rows_selected, 2);
        assert_eq!(report.kpis.weight_kg.desmontada, 100.0);
    }

    #[test]
    fn missing_screw_column_is_synthesized() {
        let report = build(sample(), &FilterSelection::new(), 10, "in.xlsx", "Plan1");
        assert_eq!(report.source.screw_column, "QUANT. PARAF.");
        assert!(report.detail.columns.contains(&"QUANT. PARAF.".to_string()));
    }

    #[test]
    fn series_colors_follow_the_palette() {
        let report = build(sample(), &FilterSelection::new(), 10, "in.xlsx", "Plan1");
        assert_eq!(report.by_bm.colors, vec!["#EF553B", "#636EFA", "#00CC96"]);
    }

    #[test]
    fn detail_rows_are_display_strings() {
        let report = build(sample(), &FilterSelection::new(), 10, "in.xlsx", "Plan1");
        assert_eq!(report.detail.rows[0][0], "10");
        assert_eq!(report.detail.rows[0][1], "VIGA W200");
        assert_eq!(report.detail.rows[0][3], "100");
    }
}
