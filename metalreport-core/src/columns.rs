//! Column name resolution and numeric coercion
//!
//! Spreadsheet authors vary punctuation and spacing in header names from one
//! file to the next, so logical fields resolve through an ordered alias
//! list: exact spellings are tried first for determinism, a normalized
//! comparison is the resilience fallback.

use crate::reader::{Table, Value};

/// Work-order (BM) identifier, the grouping key.
pub const BM: &str = "Nº BM";
/// Part description.
pub const DESCRIPTION: &str = "DESCRIÇÃO";

/// Weight (KG) per lifecycle state.
pub const WEIGHT_DISASSEMBLED: &str = "DESM.";
pub const WEIGHT_FABRICATED: &str = "FAB.";
pub const WEIGHT_INSTALLED: &str = "MONT.";

/// Unit counts per lifecycle state.
pub const UNITS_DISASSEMBLED: &str = "QTDE. DESM.";
pub const UNITS_FABRICATED: &str = "QTDE. FAB.";
pub const UNITS_INSTALLED: &str = "QTDE. MONT.";

/// Piece count and total weight, carried along for the detail view.
pub const PIECE_COUNT: &str = "QUANT. PEÇAS";
pub const WEIGHT_TOTAL: &str = "QUANT. KG";

/// Accepted spellings for the screw count column, in resolution priority.
pub const SCREW_COUNT_ALIASES: [&str; 8] = [
    "QUANT. PARAF.",
    "QUANT. PARAF",
    "QTDE. PARAF.",
    "QTDE. PARAF",
    "PARAFUSOS",
    "QTD PARAFUSOS",
    "QTD. PARAF.",
    "QTD PARAF.",
];

/// Comparison form of the fallback tier: uppercase with `.` and spaces
/// stripped.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '.' && *c != ' ')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Resolve a logical field against the table's columns.
///
/// Tier one scans `candidates` in priority order for an exact column match.
/// Tier two compares normalized forms and returns the first *column* (in
/// table order) that matches any candidate, preserving the table's own
/// spelling. `None` when neither tier hits; callers fall back to a
/// synthesized zero column rather than failing.
pub fn resolve<'a>(columns: &'a [String], candidates: &[&str]) -> Option<&'a str> {
    for candidate in candidates {
        if let Some(found) = columns.iter().find(|c| c.as_str() == *candidate) {
            return Some(found.as_str());
        }
    }

    let targets: Vec<String> = candidates.iter().map(|c| normalize(c)).collect();
    columns
        .iter()
        .find(|column| targets.contains(&normalize(column)))
        .map(String::as_str)
}

/// Make sure the screw count column exists, synthesizing an all-zero column
/// under the primary spelling when no alias resolves. Returns the column
/// name actually in use.
pub fn ensure_screw_column(table: &mut Table) -> String {
    if let Some(found) = resolve(&table.columns, &SCREW_COUNT_ALIASES) {
        return found.to_string();
    }
    table.push_zero_column(SCREW_COUNT_ALIASES[0]);
    SCREW_COUNT_ALIASES[0].to_string()
}

/// The numeric fields the report consumes; `screw_column` is the resolved
/// spelling returned by [`ensure_screw_column`].
pub fn expected_numeric_fields(screw_column: &str) -> Vec<String> {
    vec![
        PIECE_COUNT.to_string(),
        WEIGHT_TOTAL.to_string(),
        screw_column.to_string(),
        WEIGHT_FABRICATED.to_string(),
        WEIGHT_DISASSEMBLED.to_string(),
        WEIGHT_INSTALLED.to_string(),
        UNITS_FABRICATED.to_string(),
        UNITS_DISASSEMBLED.to_string(),
        UNITS_INSTALLED.to_string(),
    ]
}

/// Force every cell of the given fields to a number. Anything unparsable
/// contributes zero instead of an error, so malformed input never aborts
/// the report. Fields the table lacks are skipped.
pub fn coerce_numeric(table: &mut Table, fields: &[String]) {
    for field in fields {
        let Some(index) = table.column_index(field) else {
            continue;
        };
        for row in &mut table.rows {
            let number = row[index].as_number().unwrap_or(0.0);
            row[index] = Value::Number(number);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn exact_match_wins_in_candidate_priority_order() {
        let columns = cols(&["PARAFUSOS", "QUANT. PARAF."]);
        // Both are present; the earlier candidate wins.
        assert_eq!(
            resolve(&columns, &SCREW_COUNT_ALIASES),
            Some("QUANT. PARAF.")
        );
    }

    #[test]
    fn exact_match_beats_a_normalized_match() {
        let columns = cols(&["quant paraf", "QTDE. PARAF."]);
        assert_eq!(resolve(&columns, &SCREW_COUNT_ALIASES), Some("QTDE. PARAF."));
    }

    #[test]
    fn normalized_tier_returns_the_tables_own_spelling() {
        let columns = cols(&["parafusos"]);
        assert_eq!(
            resolve(&columns, &["QUANT. PARAF.", "PARAFUSOS"]),
            Some("parafusos")
        );
    }

    #[test]
    fn normalized_tier_scans_columns_in_table_order() {
        // Two columns normalize onto different candidates; the first column
        // wins regardless of candidate priority.
        let columns = cols(&["qtd parafusos", "quant. paraf."]);
        assert_eq!(
            resolve(&columns, &SCREW_COUNT_ALIASES),
            Some("qtd parafusos")
        );
    }

    #[test]
    fn unresolvable_field_is_none_not_an_error() {
        let columns = cols(&["Nº BM", "DESM."]);
        assert_eq!(resolve(&columns, &SCREW_COUNT_ALIASES), None);
    }

    #[test]
    fn resolve_is_deterministic() {
        let columns = cols(&["qtde paraf", "PARAFUSOS"]);
        let first = resolve(&columns, &SCREW_COUNT_ALIASES);
        for _ in 0..3 {
            assert_eq!(resolve(&columns, &SCREW_COUNT_ALIASES), first);
        }
    }

    #[test]
    fn normalize_strips_dots_and_spaces_and_uppercases() {
        assert_eq!(normalize("QUANT. PARAF."), "QUANTPARAF");
        assert_eq!(normalize("qtde. paraf"), "QTDEPARAF");
        assert_eq!(normalize("descrição"), "DESCRIÇÃO");
    }

    #[test]
    fn missing_screw_column_is_synthesized_with_zeros() {
        let mut table = Table::new(
            vec![BM.to_string()],
            vec![vec![Value::Text("10".to_string())]],
        );
        let name = ensure_screw_column(&mut table);
        assert_eq!(name, "QUANT. PARAF.");
        assert_eq!(table.value(0, "QUANT. PARAF."), Some(&Value::Number(0.0)));
    }

    #[test]
    fn present_screw_column_is_left_untouched() {
        let mut table = Table::new(
            vec!["parafusos".to_string()],
            vec![vec![Value::Number(8.0)]],
        );
        let name = ensure_screw_column(&mut table);
        assert_eq!(name, "parafusos");
        assert_eq!(table.columns.len(), 1);
    }

    #[test]
    fn coercion_zeroes_unparsable_cells_and_skips_missing_fields() {
        let mut table = Table::new(
            vec![WEIGHT_DISASSEMBLED.to_string(), DESCRIPTION.to_string()],
            vec![
                vec![Value::Text("N/A".to_string()), Value::Text("A".to_string())],
                vec![Value::Number(12.5), Value::Text("B".to_string())],
            ],
        );
        coerce_numeric(
            &mut table,
            &[WEIGHT_DISASSEMBLED.to_string(), WEIGHT_INSTALLED.to_string()],
        );
        assert_eq!(
            table.value(0, WEIGHT_DISASSEMBLED),
            Some(&Value::Number(0.0))
        );
        assert_eq!(
            table.value(1, WEIGHT_DISASSEMBLED),
            Some(&Value::Number(12.5))
        );
        // Non-numeric columns and absent fields stay as they were.
        assert_eq!(
            table.value(0, DESCRIPTION),
            Some(&Value::Text("A".to_string()))
        );
        assert!(!table.has_column(WEIGHT_INSTALLED));
    }
}
