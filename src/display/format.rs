//! Formatting helpers shared by every screen

use std::fmt::Display;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone, Utc};

use crate::config::Settings;
use crate::models::Money;

/// Fallback used when the configured date format is not valid strftime
pub const FALLBACK_DATE_FORMAT: &str = "%d %b %Y, %H:%M";

/// Amount with the configured currency symbol and two decimals
pub fn format_money(amount: Money, settings: &Settings) -> String {
    amount.format_with_symbol(&settings.currency_symbol)
}

/// Timestamp label in the given time zone
pub fn format_timestamp_in<Tz>(at: &DateTime<Utc>, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let valid = !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
    let pattern = if valid { pattern } else { FALLBACK_DATE_FORMAT };
    at.with_timezone(tz).format(pattern).to_string()
}

/// Timestamp label in local time using the configured format
pub fn format_timestamp(at: &DateTime<Utc>, settings: &Settings) -> String {
    format_timestamp_in(at, &Local, &settings.date_format)
}

/// Percentage with one decimal place
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Simple horizontal bar for a share of 100%
pub fn format_bar(pct: f64, width: usize) -> String {
    if pct <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((pct / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum display width
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
