//! Catalog classification: derives seven canonical fields per row from the
//! free-text/numeric source columns, so filtering never touches raw cells.
//!
//! Classification is a pure function of a single row. Malformed or missing
//! data degrades to `Unknown`/`false`; nothing in this module errors.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{INJURY_EPSILON, INJURY_OK_CODE};
use crate::table::{Cell, ColumnKey, Table};
use crate::text::normalize_cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Road,
    Trail,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Race,
    Training,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceGroup {
    Short,
    Medium,
    Long,
    Unknown,
}

/// The derived fields for one catalog row. Used only for filtering; never
/// displayed or exported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRow {
    pub gender: Gender,
    pub surface: Surface,
    pub goal: Goal,
    pub is_long_durability: bool,
    pub distance_group: DistanceGroup,
    pub injury_ok: bool,
    pub pronation_yes: bool,
}

/// A source table plus the derived fields for each of its rows, index-aligned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedTable {
    source: Table,
    derived: Vec<ClassifiedRow>,
}

impl ClassifiedTable {
    pub fn source(&self) -> &Table {
        &self.source
    }

    pub fn derived(&self) -> &[ClassifiedRow] {
        &self.derived
    }
}

/// The catalog source columns, addressed by stringified 1-based position.
/// An absent column yields `Unknown`/`false` for its field on every row.
const GENDER_COLUMN: usize = 1;
const SURFACE_COLUMN: usize = 2;
const GOAL_COLUMN: usize = 3;
const DURABILITY_COLUMN: usize = 4;
const DISTANCE_COLUMN: usize = 5;
const INJURY_COLUMN: usize = 6;
const PRONATION_COLUMN: usize = 7;

/// The male branch is checked first, so any text containing "male" (that
/// includes "female") classifies as male. Female catalog rows use "kadin".
pub fn map_gender(text: &str) -> Gender {
    if text.contains("erkek") || text.contains("male") {
        Gender::Male
    } else if text.contains("kadin") || text.contains("female") {
        Gender::Female
    } else {
        Gender::Unknown
    }
}

pub fn map_surface(text: &str) -> Surface {
    if text.contains("yol") || text.contains("road") {
        Surface::Road
    } else if text.contains("patika") || text.contains("trail") {
        Surface::Trail
    } else {
        Surface::Unknown
    }
}

pub fn map_goal(text: &str) -> Goal {
    if text.contains("yaris") || text.contains("race") {
        Goal::Race
    } else if text.contains("antrenman") || text.contains("training") {
        Goal::Training
    } else {
        Goal::Unknown
    }
}

pub fn is_long_durability(text: &str) -> bool {
    text.contains("uzun") && (text.contains("omurlu") || text.contains("omur"))
}

/// Checked medium, then long, then short; first match wins.
pub fn map_distance_group(text: &str) -> DistanceGroup {
    if (text.contains("orta") && text.contains("mesafe")) || text.contains("medium") {
        DistanceGroup::Medium
    } else if (text.contains("uzun") && text.contains("mesafe")) || text.contains("long") {
        DistanceGroup::Long
    } else if (text.contains("kisa") && text.contains("mesafe")) || text.contains("short") {
        DistanceGroup::Short
    } else {
        DistanceGroup::Unknown
    }
}

/// Numeric cells (or text parsing as a number) match the catalog's injury
/// code; everything else falls back to keyword matching.
pub fn injury_ok(cell: &Cell) -> bool {
    match cell.as_f64() {
        Some(v) => (v - INJURY_OK_CODE).abs() < INJURY_EPSILON,
        None => {
            let t = normalize_cell(cell);
            t.contains("evet") || t.contains("uygun") || t.contains("yes")
        }
    }
}

pub fn pronation_yes(text: &str) -> bool {
    text.contains("evet") || text == "1" || text.contains("yes")
}

fn classify_row(table: &Table, row: usize, cols: &Columns) -> ClassifiedRow {
    let text_at = |col: Option<usize>| -> String {
        col.map(|c| normalize_cell(table.cell(row, c)))
            .unwrap_or_default()
    };
    let empty = Cell::Empty;
    let injury_cell = cols.injury.map(|c| table.cell(row, c)).unwrap_or(&empty);

    ClassifiedRow {
        gender: map_gender(&text_at(cols.gender)),
        surface: map_surface(&text_at(cols.surface)),
        goal: map_goal(&text_at(cols.goal)),
        is_long_durability: is_long_durability(&text_at(cols.durability)),
        distance_group: map_distance_group(&text_at(cols.distance)),
        injury_ok: injury_ok(injury_cell),
        pronation_yes: pronation_yes(&text_at(cols.pronation)),
    }
}

struct Columns {
    gender: Option<usize>,
    surface: Option<usize>,
    goal: Option<usize>,
    durability: Option<usize>,
    distance: Option<usize>,
    injury: Option<usize>,
    pronation: Option<usize>,
}

impl Columns {
    fn resolve(table: &Table) -> Self {
        let at = |pos: usize| table.column_index(&ColumnKey::Position(pos));
        Self {
            gender: at(GENDER_COLUMN),
            surface: at(SURFACE_COLUMN),
            goal: at(GOAL_COLUMN),
            durability: at(DURABILITY_COLUMN),
            distance: at(DISTANCE_COLUMN),
            injury: at(INJURY_COLUMN),
            pronation: at(PRONATION_COLUMN),
        }
    }
}

/// Derive the canonical fields for every row of a catalog table.
///
/// Per-row and order-independent: a row classifies identically regardless of
/// its position or of the other rows present.
pub fn classify(table: &Table) -> ClassifiedTable {
    let cols = Columns::resolve(table);
    let derived = (0..table.row_count())
        .map(|row| classify_row(table, row, &cols))
        .collect::<Vec<_>>();
    debug!(rows = derived.len(), "classified catalog");
    ClassifiedTable {
        source: table.clone(),
        derived,
    }
}
