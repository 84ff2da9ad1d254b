pub mod classify;
pub mod columns;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod filter;
pub mod logging;
pub mod source;
pub mod table;
pub mod text;
pub mod wizard;

pub use classify::{classify, ClassifiedTable};
pub use filter::{apply_filters, AnswerSet};
pub use table::Table;
