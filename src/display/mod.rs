//! Display formatting for terminal output
//!
//! Provides utilities for formatting amounts, dates and whole screens for
//! terminal display.

pub mod format;
pub mod screens;

pub use format::{format_money, format_percentage, format_timestamp, format_timestamp_in};
pub use screens::{format_analytics, format_expense_list, format_history, format_home};
