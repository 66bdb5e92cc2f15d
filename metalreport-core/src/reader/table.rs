//! Tabular data model shared by every pipeline stage

use std::collections::BTreeSet;
use std::fmt;

/// A single cell after loading.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    Empty,
}

impl Value {
    /// Check if the cell carries no data
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Numeric view used by coercion and sums: text must parse as a plain
    /// float, booleans count as 0/1, anything else is not a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            Value::Empty => None,
        }
    }
}

/// Largest magnitude at which every integer is still exact in an f64.
const INTEGER_DISPLAY_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

impl fmt::Display for Value {
    /// String form used for grouping keys, filter comparisons and the detail
    /// dump. Whole numbers drop the decimal tail, so a BM number stored as
    /// `10.0` reads back as `"10"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) if n.fract() == 0.0 && n.abs() < INTEGER_DISPLAY_LIMIT => {
                write!(f, "{}", *n as i64)
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Empty => Ok(()),
        }
    }
}

/// An ordered header list plus row-major records. Every row holds exactly
/// one value per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table, padding or truncating every row to the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell lookup by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Sum of a column's numeric values; a missing column sums to zero, as
    /// do cells that are not numbers.
    pub fn sum_or_zero(&self, column: &str) -> f64 {
        match self.column_index(column) {
            Some(idx) => self
                .rows
                .iter()
                .map(|row| row[idx].as_number().unwrap_or(0.0))
                .sum(),
            None => 0.0,
        }
    }

    /// Sorted, deduplicated string forms of a column's values. This is what
    /// the filter widgets offer as options; a missing column offers nothing.
    pub fn unique_strings(&self, column: &str) -> Vec<String> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        let set: BTreeSet<String> = self.rows.iter().map(|row| row[idx].to_string()).collect();
        set.into_iter().collect()
    }

    /// Append a column filled with numeric zero. Fallback for expected
    /// columns the spreadsheet turned out not to have.
    pub fn push_zero_column(&mut self, name: impl Into<String>) {
        self.columns.push(name.into());
        for row in &mut self.rows {
            row.push(Value::Number(0.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["Nº BM".to_string(), "DESM.".to_string()],
            vec![
                vec![Value::Number(10.0), Value::Number(100.0)],
                vec![Value::Text("20".to_string()), Value::Number(200.5)],
                vec![Value::Number(10.0), Value::Text("N/A".to_string())],
            ],
        )
    }

    #[test]
    fn whole_numbers_display_without_decimal_tail() {
        assert_eq!(Value::Number(10.0).to_string(), "10");
        assert_eq!(Value::Number(10.5).to_string(), "10.5");
        assert_eq!(Value::Number(-3.0).to_string(), "-3");
        assert_eq!(Value::Text("abc".to_string()).to_string(), "abc");
        assert_eq!(Value::Empty.to_string(), "");
    }

    #[test]
    fn as_number_parses_text_and_booleans() {
        assert_eq!(Value::Number(1.5).as_number(), Some(1.5));
        assert_eq!(Value::Text(" 2.5 ".to_string()).as_number(), Some(2.5));
        assert_eq!(Value::Text("N/A".to_string()).as_number(), None);
        assert_eq!(Value::Bool(true).as_number(), Some(1.0));
        assert_eq!(Value::Empty.as_number(), None);
    }

    #[test]
    fn new_pads_short_rows_to_header_width() {
        let table = Table::new(
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec![vec![Value::Number(1.0)]],
        );
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], Value::Empty);
    }

    #[test]
    fn sum_or_zero_handles_missing_columns_and_bad_cells() {
        let table = sample();
        assert_eq!(table.sum_or_zero("DESM."), 300.5);
        assert_eq!(table.sum_or_zero("nope"), 0.0);
    }

    #[test]
    fn unique_strings_are_sorted_and_deduplicated() {
        let table = sample();
        assert_eq!(table.unique_strings("Nº BM"), vec!["10", "20"]);
        assert!(table.unique_strings("missing").is_empty());
    }

    #[test]
    fn push_zero_column_extends_every_row() {
        let mut table = sample();
        table.push_zero_column("QUANT. PARAF.");
        assert!(table.has_column("QUANT. PARAF."));
        for row in &table.rows {
            assert_eq!(row.last(), Some(&Value::Number(0.0)));
        }
    }
}
