//! Grouped sums, running totals, per-group ratios and rankings

use std::collections::BTreeMap;

use serde::Serialize;

use crate::reader::Table;

/// A numeric column to sum per group, with the label it carries in the
/// report.
#[derive(Debug, Clone)]
pub struct Measure {
    pub source: String,
    pub name: String,
}

impl Measure {
    pub fn new(source: &str, name: &str) -> Self {
        Self {
            source: source.to_string(),
            name: name.to_string(),
        }
    }
}

/// One group with its summed measures, in the same order the measures were
/// requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationRow {
    pub key: String,
    pub values: Vec<f64>,
}

/// A per-group ratio. `None` marks a group whose denominator had no mass,
/// which renders as a gap rather than a zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioPoint {
    pub key: String,
    pub ratio: Option<f64>,
}

/// Sum `measures` per distinct stringified value of `group_key`.
///
/// Groups come back sorted by key as text, so purely numeric keys order
/// lexicographically ("10" before "100" before "20"). Rows missing the key
/// column fall into the empty-string group; a missing measure column sums
/// to zero.
pub fn aggregate(table: &Table, group_key: &str, measures: &[Measure]) -> Vec<AggregationRow> {
    let key_index = table.column_index(group_key);
    let measure_indexes: Vec<Option<usize>> = measures
        .iter()
        .map(|m| table.column_index(&m.source))
        .collect();

    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in &table.rows {
        let key = key_index
            .map(|index| row[index].to_string())
            .unwrap_or_default();
        let totals = groups.entry(key).or_insert_with(|| vec![0.0; measures.len()]);
        for (slot, index) in totals.iter_mut().zip(&measure_indexes) {
            if let Some(index) = index {
                *slot += row[*index].as_number().unwrap_or(0.0);
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, values)| AggregationRow { key, values })
        .collect()
}

/// Running totals over already-aggregated rows, preserving their order.
pub fn cumulative(rows: &[AggregationRow]) -> Vec<AggregationRow> {
    let width = rows.first().map_or(0, |row| row.values.len());
    let mut totals = vec![0.0; width];
    rows.iter()
        .map(|row| {
            for (total, value) in totals.iter_mut().zip(&row.values) {
                *total += value;
            }
            AggregationRow {
                key: row.key.clone(),
                values: totals.clone(),
            }
        })
        .collect()
}

/// Per-group quotient of two measure slots. Groups where the denominator is
/// not strictly positive yield `None`.
pub fn ratio(rows: &[AggregationRow], numerator: usize, denominator: usize) -> Vec<RatioPoint> {
    rows.iter()
        .map(|row| {
            let num = row.values[numerator];
            let den = row.values[denominator];
            RatioPoint {
                key: row.key.clone(),
                ratio: (den > 0.0).then(|| num / den),
            }
        })
        .collect()
}

/// The `n` groups with the largest summed `measure`, descending. Ties keep
/// the ascending key order of the underlying aggregation.
pub fn top_groups(table: &Table, group_key: &str, measure: &str, n: usize) -> Vec<AggregationRow> {
    let mut rows = aggregate(table, group_key, &[Measure::new(measure, measure)]);
    rows.sort_by(|a, b| b.values[0].total_cmp(&a.values[0]));
    rows.truncate(n);
    rows
}
