//! Row filtering by accepted categorical values

use std::collections::{BTreeMap, BTreeSet};

use crate::reader::Table;

/// Accepted values per field. An absent field or an empty set imposes no
/// constraint ("accept all"); fields with values compose with logical AND.
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    accepted: BTreeMap<String, BTreeSet<String>>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add accepted values for a field, extending any existing set.
    pub fn accept<I, S>(&mut self, field: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted
            .entry(field.to_string())
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }

    /// Accepted values for a field, if any were selected.
    pub fn accepted(&self, field: &str) -> Option<&BTreeSet<String>> {
        self.accepted.get(field).filter(|set| !set.is_empty())
    }

    /// True when no field carries a constraint.
    pub fn is_unconstrained(&self) -> bool {
        self.accepted.values().all(BTreeSet::is_empty)
    }

    /// Fields that actually constrain rows, with their accepted sets.
    pub fn constrained_fields(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.accepted
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(field, set)| (field.as_str(), set))
    }
}

/// Keep rows whose stringified cell is accepted for every constrained field.
///
/// The input table is untouched and row order is preserved. A constrained
/// field the table does not have is a no-op rather than an error: selections
/// name spreadsheet columns, and the report must stay renderable against
/// files that lack them.
pub fn apply(table: &Table, selection: &FilterSelection) -> Table {
    let constraints: Vec<(usize, &BTreeSet<String>)> = selection
        .constrained_fields()
        .filter_map(|(field, set)| table.column_index(field).map(|index| (index, set)))
        .collect();

    if constraints.is_empty() {
        return table.clone();
    }

    let rows = table
        .rows
        .iter()
        .filter(|row| {
            constraints
                .iter()
                .all(|(index, set)| set.contains(&row[*index].to_string()))
        })
        .cloned()
        .collect();

    Table {
        columns: table.columns.clone(),
        rows,
    }
}
