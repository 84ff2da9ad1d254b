//! In-memory tabular catalog model.
//!
//! A [`Table`] is an immutable grid of heterogeneous cells under an ordered
//! header row. The core never mutates a table it is given; classification and
//! filtering return new derived structures.

use serde::{Deserialize, Serialize};

/// A single cell value: text, a number, or missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Numeric view of the cell. Text cells parse leniently (trimmed);
    /// anything unparseable is None rather than an error.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            Cell::Empty => None,
        }
    }

    /// Display form for rendering and export. Missing cells render empty.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// How a caller addresses a column: by header name, or by 1-based position.
///
/// Positional access resolves through the *header*: position `k` reads the
/// column literally named `k`'s string form. A catalog whose header lacks a
/// column named "6" simply has no sixth data field, it is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKey {
    Name(String),
    Position(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Index of the column a key resolves to, if any. Name keys match the
    /// header exactly; positional keys match the stringified position.
    pub fn column_index(&self, key: &ColumnKey) -> Option<usize> {
        let wanted = match key {
            ColumnKey::Name(name) => name.clone(),
            ColumnKey::Position(pos) => pos.to_string(),
        };
        self.columns.iter().position(|c| *c == wanted)
    }

    /// Cell at (row, column index). Ragged rows read as missing past their
    /// end, so short CSV records degrade instead of panicking.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// New table with the same columns, keeping only the given rows, in the
    /// order given.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        let rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// New table restricted to the named columns, in the order given.
    /// Unknown names are skipped.
    pub fn project(&self, names: &[String]) -> Table {
        let picked: Vec<usize> = names
            .iter()
            .filter_map(|n| self.columns.iter().position(|c| c == n))
            .collect();
        let columns = picked.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                picked
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(Cell::Empty))
                    .collect()
            })
            .collect();
        Table { columns, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["1".into(), "Model".into()],
            vec![
                vec![Cell::Text("Erkek".into()), Cell::Text("Alpha".into())],
                vec![Cell::Number(1.2)],
            ],
        )
    }

    #[test]
    fn lookup_by_name_and_position() {
        let t = sample();
        assert_eq!(t.column_index(&ColumnKey::Name("Model".into())), Some(1));
        assert_eq!(t.column_index(&ColumnKey::Position(1)), Some(0));
        assert_eq!(t.column_index(&ColumnKey::Position(2)), None);
        assert_eq!(t.column_index(&ColumnKey::Name("missing".into())), None);
    }

    #[test]
    fn ragged_rows_read_as_missing() {
        let t = sample();
        assert_eq!(*t.cell(1, 1), Cell::Empty);
        assert_eq!(*t.cell(99, 0), Cell::Empty);
    }

    #[test]
    fn numeric_view() {
        assert_eq!(Cell::Number(1.2).as_f64(), Some(1.2));
        assert_eq!(Cell::Text(" 1.2 ".into()).as_f64(), Some(1.2));
        assert_eq!(Cell::Text("Hayır".into()).as_f64(), None);
        assert_eq!(Cell::Empty.as_f64(), None);
    }

    #[test]
    fn projection_skips_unknown_names() {
        let t = sample();
        let p = t.project(&["Model".to_string(), "nope".to_string()]);
        assert_eq!(p.columns(), &["Model".to_string()]);
        assert_eq!(p.rows()[0], vec![Cell::Text("Alpha".into())]);
        assert_eq!(p.rows()[1], vec![Cell::Empty]);
    }
}
