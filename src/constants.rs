/// Spreadsheet letters of the columns shown to the end user, in display
/// order. Distinct from the seven classification source columns ("1".."7"),
/// which are filter-only and never displayed.
pub const DISPLAY_COLUMN_LETTERS: [&str; 10] = ["B", "C", "D", "H", "K", "L", "M", "N", "O", "P"];

/// Numeric code the catalog uses in the injury column to mark a shoe as
/// suitable after a knee/hip injury. Undocumented spreadsheet convention;
/// compared within INJURY_EPSILON, never reinterpreted.
pub const INJURY_OK_CODE: f64 = 1.2;
pub const INJURY_EPSILON: f64 = 1e-6;

/// HTTP timeout for remote catalog downloads.
pub const FETCH_TIMEOUT_SECS: u64 = 60;

/// Number of questionnaire steps.
pub const WIZARD_STEPS: u8 = 7;
