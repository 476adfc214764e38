//! HTML parsers for the exam timetable page
//!
//! - `table`: map `<tr>` rows to code/name/time cells and filter them

pub mod table;

// Re-export main parsing functions
pub use table::{extract_matches, parse_rows, CODE_CELL, NAME_CELL, TIME_CELL};
