//! Analytics screen: range totals and the category breakdown

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::aggregate::{filter_by_range, percentage_of, sum_amount, summarize_by_category};
use crate::models::{CategorySummary, Expense, Money, TimeRange};

use super::live::LiveFeed;
use super::state::ViewState;

/// A category summary with its share of the range total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    #[serde(flatten)]
    pub summary: CategorySummary,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsData {
    pub range: TimeRange,
    /// Total within the selected range
    pub total: Money,
    /// Calendar-month total, whatever the selected range
    pub month_total: Money,
    /// Largest share first
    pub categories: Vec<CategoryShare>,
}

impl AnalyticsData {
    /// `None` when no record falls inside `range`
    pub fn compute<Tz: TimeZone>(
        records: &[Expense],
        range: TimeRange,
        now: &DateTime<Tz>,
    ) -> Option<Self> {
        let in_range = filter_by_range(records, range, now);
        if in_range.is_empty() {
            return None;
        }

        let total = sum_amount(&in_range);
        let month_total = sum_amount(&filter_by_range(records, TimeRange::ThisMonth, now));

        let categories = summarize_by_category(&in_range)
            .into_iter()
            .map(|summary| CategoryShare {
                percentage: percentage_of(summary.total_amount, total),
                summary,
            })
            .collect();

        Some(Self {
            range,
            total,
            month_total,
            categories,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalyticsView {
    range: TimeRange,
}

impl AnalyticsView {
    pub fn new(range: TimeRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn select_range(&mut self, range: TimeRange) {
        self.range = range;
    }

    pub fn render<Tz: TimeZone>(
        &self,
        feed: &LiveFeed,
        now: &DateTime<Tz>,
    ) -> ViewState<AnalyticsData> {
        feed.state()
            .derive(|records| AnalyticsData::compute(records, self.range, now))
    }
}
