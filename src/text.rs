//! Accent-insensitive text normalization.
//!
//! Catalog text is inconsistently accented, cased, and spaced across Turkish
//! and English entries; every matching rule in the classifier runs over the
//! output of [`normalize`] so "Uzun Ömürlü", "uzun omurlu" and " UZUN  ÖMÜRLÜ "
//! all compare equal.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::table::Cell;

/// Lowercase, NFKD-decompose, strip combining marks, collapse whitespace.
///
/// Total and pure: every input produces a string, possibly empty.
pub fn normalize(s: &str) -> String {
    let stripped: String = s.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    let lowered = stripped.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut last_was_space = false;
    for ch in lowered.trim().chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out
}

/// Normalized text form of a cell. Numbers render in their shortest natural
/// form (1.0 -> "1"), missing cells render empty.
pub fn normalize_cell(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => normalize(s),
        Cell::Number(n) => normalize(&n.to_string()),
        Cell::Empty => String::new(),
    }
}
