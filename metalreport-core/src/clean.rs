//! Basic table cleaning: blank rows, placeholder columns, zero fill

use crate::reader::{Table, Value};

/// Header prefix marking auto-generated index columns. The loader also
/// synthesizes this name for blank header cells.
pub const PLACEHOLDER_PREFIX: &str = "Unnamed";

/// Clean a freshly loaded table, in order:
///
/// 1. drop rows where every cell is empty;
/// 2. drop columns whose trimmed header is empty or starts with
///    [`PLACEHOLDER_PREFIX`], keeping the first column when trimming makes
///    two headers collide;
/// 3. replace the remaining empty cells with numeric zero; absence is
///    treated as zero by policy, not as missing data;
/// 4. trim header whitespace.
///
/// An empty input is a valid empty result. Cleaning an already-clean table
/// changes nothing.
pub fn clean(table: Table) -> Table {
    let Table { columns, rows } = table;

    let mut kept: Vec<(usize, String)> = Vec::with_capacity(columns.len());
    for (index, name) in columns.iter().enumerate() {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.starts_with(PLACEHOLDER_PREFIX) {
            continue;
        }
        if kept.iter().any(|(_, existing)| existing == trimmed) {
            continue;
        }
        kept.push((index, trimmed.to_string()));
    }

    // Blank-row detection looks at the full original row: a row carrying
    // data only in a dropped column still counts as non-blank.
    let rows = rows
        .into_iter()
        .filter(|row| !row.iter().all(Value::is_empty))
        .map(|row| {
            kept.iter()
                .map(|(index, _)| match &row[*index] {
                    Value::Empty => Value::Number(0.0),
                    value => value.clone(),
                })
                .collect()
        })
        .collect();

    Table {
        columns: kept.into_iter().map(|(_, name)| name).collect(),
        rows,
    }
}
