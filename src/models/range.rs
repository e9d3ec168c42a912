//! Time range selector for filtering expenses

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which slice of the record set a view aggregates over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    /// Same calendar day as now
    Today,
    /// Rolling 168-hour window ending now
    Last7Days,
    /// Same calendar month and year as now
    ThisMonth,
    /// Same calendar year as now
    ThisYear,
    /// No filtering
    #[default]
    AllTime,
}

impl TimeRange {
    pub const ALL: [TimeRange; 5] = [
        TimeRange::Today,
        TimeRange::Last7Days,
        TimeRange::ThisMonth,
        TimeRange::ThisYear,
        TimeRange::AllTime,
    ];

    /// Parse a range from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "today" | "day" => Some(Self::Today),
            "7d" | "week" | "last7days" | "last_7_days" | "last-7-days" => Some(Self::Last7Days),
            "month" | "this_month" | "this-month" => Some(Self::ThisMonth),
            "year" | "this_year" | "this-year" => Some(Self::ThisYear),
            "all" | "all_time" | "all-time" => Some(Self::AllTime),
            _ => None,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => write!(f, "Today"),
            Self::Last7Days => write!(f, "Last 7 Days"),
            Self::ThisMonth => write!(f, "This Month"),
            Self::ThisYear => write!(f, "This Year"),
            Self::AllTime => write!(f, "All Time"),
        }
    }
}
