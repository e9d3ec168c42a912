//! Derived, in-memory-only aggregates
//!
//! None of these are persisted. They are rebuilt from the latest snapshot
//! every time a view recomputes.

use serde::Serialize;

use super::money::Money;

/// Total and count for one distinct category string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub total_amount: Money,
    pub transaction_count: usize,
}

/// Dashboard totals
///
/// The three windows are computed independently and overlap: an expense made
/// today counts towards all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PeriodTotals {
    pub today: Money,
    pub week: Money,
    pub month: Money,
}
