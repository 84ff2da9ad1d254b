//! Result serialization: the filtered catalog, projected onto the display
//! columns, rendered as CSV, JSON, or an aligned text table.

use chrono::Local;
use csv::WriterBuilder;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::table::Table;

/// CSV with a header row, UTF-8, one record per catalog row.
pub fn to_csv_string(table: &Table) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(table.columns())?;
    for row in table.rows() {
        let record: Vec<String> = (0..table.columns().len())
            .map(|i| row.get(i).map(|c| c.display()).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| crate::error::AdvisorError::Source(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn write_csv(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_csv_string(table)?)?;
    info!(path = %path.display(), rows = table.row_count(), "wrote CSV export");
    Ok(())
}

/// JSON array of column-name → cell-value objects. Numbers stay numbers,
/// missing cells become null.
pub fn to_json_string(table: &Table) -> Result<String> {
    let rows: Vec<Value> = table
        .rows()
        .iter()
        .map(|row| {
            let mut object = Map::new();
            for (i, name) in table.columns().iter().enumerate() {
                let value = match row.get(i) {
                    Some(cell) => serde_json::to_value(cell)?,
                    None => Value::Null,
                };
                object.insert(name.clone(), value);
            }
            Ok(Value::Object(object))
        })
        .collect::<Result<_>>()?;
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Plain-text rendering for the terminal, columns padded to their widest
/// value.
pub fn render_text(table: &Table) -> String {
    let mut widths: Vec<usize> = table.columns().iter().map(|c| c.chars().count()).collect();
    let rendered: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| {
            (0..widths.len())
                .map(|i| row.get(i).map(|c| c.display()).unwrap_or_default())
                .collect()
        })
        .collect();
    for row in &rendered {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let format_row = |cells: Vec<String>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:width$}", c, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    out.push_str(&format_row(table.columns().to_vec()));
    out.push('\n');
    for row in rendered {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}

/// Dated default name for a CSV download.
pub fn default_export_filename() -> String {
    format!("recommendations_{}.csv", Local::now().format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn result_table() -> Table {
        Table::new(
            vec!["Model".into(), "Price".into()],
            vec![
                vec![Cell::Text("Alpha".into()), Cell::Number(120.0)],
                vec![Cell::Text("Beta".into()), Cell::Empty],
            ],
        )
    }

    #[test]
    fn csv_round_trips_through_the_loader() {
        let csv = to_csv_string(&result_table()).unwrap();
        assert!(csv.starts_with("Model,Price\n"));
        let reloaded = crate::source::table_from_csv_bytes(csv.as_bytes()).unwrap();
        assert_eq!(reloaded.columns(), result_table().columns());
        assert_eq!(reloaded.row_count(), 2);
    }

    #[test]
    fn json_keeps_cell_types() {
        let json = to_json_string(&result_table()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["Model"], "Alpha");
        assert_eq!(parsed[0]["Price"], 120.0);
        assert!(parsed[1]["Price"].is_null());
    }

    #[test]
    fn text_rendering_pads_columns() {
        let text = render_text(&result_table());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Model  Price");
        assert_eq!(lines[1], "Alpha  120");
        assert_eq!(lines[2], "Beta");
    }

    #[test]
    fn empty_result_is_a_header_only_csv() {
        let table = Table::new(vec!["Model".into()], vec![]);
        assert_eq!(to_csv_string(&table).unwrap(), "Model\n");
    }
}
