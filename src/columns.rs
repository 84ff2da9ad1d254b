//! Column resolver: maps the fixed spreadsheet letters of the display fields
//! to actual header names of a loaded catalog.
//!
//! Letters that fall outside the table, or resolve to a name the header does
//! not carry, are silently skipped; the projection simply gets narrower.

use crate::constants::DISPLAY_COLUMN_LETTERS;
use crate::table::Table;

/// 1-based column index of a spreadsheet letter ("A" -> 1, "Z" -> 26,
/// "AA" -> 27). None for anything that is not ASCII letters.
pub fn letter_to_index(letter: &str) -> Option<usize> {
    if letter.is_empty() {
        return None;
    }
    let mut value = 0usize;
    for ch in letter.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        value = value * 26 + digit;
    }
    Some(value)
}

/// Header names the given letters resolve to, in letter order, skipping
/// letters beyond the table's width.
pub fn resolve_letters(table: &Table, letters: &[&str]) -> Vec<String> {
    let columns = table.columns();
    letters
        .iter()
        .filter_map(|letter| {
            let idx = letter_to_index(letter)?;
            columns.get(idx - 1).cloned()
        })
        .filter(|name| table.has_column(name))
        .collect()
}

/// The display/export projection for a catalog: the fixed letter list
/// resolved against its header.
pub fn resolve_output_columns(table: &Table) -> Vec<String> {
    resolve_letters(table, &DISPLAY_COLUMN_LETTERS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    #[test]
    fn letter_arithmetic() {
        assert_eq!(letter_to_index("A"), Some(1));
        assert_eq!(letter_to_index("B"), Some(2));
        assert_eq!(letter_to_index("Z"), Some(26));
        assert_eq!(letter_to_index("AA"), Some(27));
        assert_eq!(letter_to_index("p"), Some(16));
        assert_eq!(letter_to_index(""), None);
        assert_eq!(letter_to_index("4"), None);
    }

    fn table_with_columns(n: usize) -> Table {
        let columns = (0..n).map(|i| format!("col{}", i + 1)).collect();
        Table::new(columns, vec![vec![Cell::Empty; n]])
    }

    #[test]
    fn narrow_table_drops_out_of_range_letters() {
        // five columns: "H" (8th) and everything past it fall away
        let table = table_with_columns(5);
        let resolved = resolve_output_columns(&table);
        assert_eq!(resolved, vec!["col2", "col3", "col4"]);
    }

    #[test]
    fn wide_table_resolves_all_letters() {
        let table = table_with_columns(16);
        let resolved = resolve_output_columns(&table);
        assert_eq!(resolved.len(), DISPLAY_COLUMN_LETTERS.len());
        assert_eq!(resolved[0], "col2");
        assert_eq!(resolved[9], "col16");
    }

    #[test]
    fn order_follows_letters_not_table() {
        let table = table_with_columns(16);
        let resolved = resolve_letters(&table, &["D", "B"]);
        assert_eq!(resolved, vec!["col4", "col2"]);
    }
}
