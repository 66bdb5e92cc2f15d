//! Spreadsheet loader built on calamine

use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

pub mod table;

pub use table::{Table, Value};

use crate::clean::PLACEHOLDER_PREFIX;
use crate::error::LoadError;

/// Read one worksheet into a [`Table`], promoting the first row to headers.
///
/// `sheet` picks a worksheet by name; `None` takes the workbook's first
/// sheet. Returns the table together with the name of the sheet actually
/// read. The only failures are the fatal [`LoadError`] cases; data-quality
/// problems inside the sheet never fail here.
pub fn read_table<P: AsRef<Path>>(
    path: P,
    sheet: Option<&str>,
) -> Result<(Table, String), LoadError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(requested) => {
            if !names.iter().any(|n| n == requested) {
                return Err(LoadError::SheetNotFound {
                    sheet: requested.to_string(),
                    path: path.to_path_buf(),
                });
            }
            requested.to_string()
        }
        None => names.first().cloned().ok_or_else(|| LoadError::NoSheets {
            path: path.to_path_buf(),
        })?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|source| LoadError::Read {
            sheet: sheet_name.clone(),
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(LoadError::NoHeader {
            sheet: sheet_name,
            path: path.to_path_buf(),
        });
    };

    let columns: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(index, cell)| header_name(cell, index))
        .collect();
    let records: Vec<Vec<Value>> = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    Ok((Table::new(columns, records), sheet_name))
}

/// Header cells keep their text form; empty ones get the `Unnamed: N`
/// placeholder the cleaner strips later.
fn header_name(cell: &Data, index: usize) -> String {
    match cell_value(cell) {
        Value::Empty => format!("{PLACEHOLDER_PREFIX}: {index}"),
        value => value.to_string(),
    }
}

/// Map a calamine cell onto the pipeline value model. Error cells become
/// text, which the numeric coercion later zeroes out.
fn cell_value(data: &Data) -> Value {
    match data {
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) => Value::Number(*f),
        Data::String(s) => Value::Text(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        Data::Error(e) => Value::Text(format!("{e:?}")),
        Data::Empty => Value::Empty,
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Value::Text(s.clone()),
        Data::DurationIso(s) => Value::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_values_map_onto_the_pipeline_model() {
        assert_eq!(cell_value(&Data::Int(7)), Value::Number(7.0));
        assert_eq!(cell_value(&Data::Float(1.5)), Value::Number(1.5));
        assert_eq!(
            cell_value(&Data::String("GPI".to_string())),
            Value::Text("GPI".to_string())
        );
        assert_eq!(cell_value(&Data::Bool(true)), Value::Bool(true));
        assert_eq!(cell_value(&Data::Empty), Value::Empty);
    }

    #[test]
    fn empty_header_cells_get_the_placeholder_name() {
        assert_eq!(header_name(&Data::Empty, 3), "Unnamed: 3");
        assert_eq!(header_name(&Data::String("Nº BM".to_string()), 0), "Nº BM");
        // Numeric headers keep their printed value, like the source table.
        assert_eq!(header_name(&Data::Float(2024.0), 1), "2024");
    }
}
