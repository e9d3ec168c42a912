//! Export module for Expensio
//!
//! - CSV: history lists and category breakdowns (spreadsheet-compatible)

pub mod csv;

pub use self::csv::{export_categories_csv, export_expenses_csv};
