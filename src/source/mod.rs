//! Catalog loading: CSV from a local path, raw bytes, or a remote URL.
//!
//! The first record is the header. Cells that parse as numbers load as
//! numbers, empty cells load as missing; everything else stays text. Ragged
//! records are accepted and read as missing past their end.

pub mod fetch;

use csv::ReaderBuilder;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::table::{Cell, Table};

fn parse_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(n) => Cell::Number(n),
        Err(_) => Cell::Text(raw.to_string()),
    }
}

/// Parse CSV bytes into a table.
pub fn table_from_csv_bytes(bytes: &[u8]) -> Result<Table> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes);
    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(parse_cell).collect());
    }
    Ok(Table::new(columns, rows))
}

/// Load a catalog CSV from disk.
pub fn load_catalog_from_path(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let table = table_from_csv_bytes(&bytes)?;
    info!(path = %path.display(), rows = table.row_count(), "loaded catalog");
    Ok(table)
}

/// Fetch and parse a remote catalog, going through the byte cache.
pub fn load_catalog_from_url(url: &str, cache_dir: &Path) -> Result<Table> {
    let bytes = fetch::fetch_bytes(url, cache_dir)?;
    let table = table_from_csv_bytes(&bytes)?;
    info!(%url, rows = table.row_count(), "loaded remote catalog");
    Ok(table)
}
