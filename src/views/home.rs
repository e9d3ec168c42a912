//! Home screen: period totals and the most recent expenses

use chrono::{DateTime, TimeZone};

use crate::aggregate::{compute_period_totals, sort_newest_first};
use crate::models::{Expense, PeriodTotals};

use super::live::LiveFeed;
use super::state::ViewState;

/// Number of recent expenses shown when settings say nothing else
pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct HomeData {
    pub totals: PeriodTotals,
    /// Newest first, at most `recent_limit` long
    pub recent: Vec<Expense>,
    /// Number of expenses in the snapshot
    pub record_count: usize,
}

impl HomeData {
    /// `None` when there are no records at all
    pub fn compute<Tz: TimeZone>(
        records: &[Expense],
        recent_limit: usize,
        now: &DateTime<Tz>,
    ) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut recent = records.to_vec();
        sort_newest_first(&mut recent);
        recent.truncate(recent_limit);

        Some(Self {
            totals: compute_period_totals(records, now),
            recent,
            record_count: records.len(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct HomeView {
    recent_limit: usize,
}

impl Default for HomeView {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}

impl HomeView {
    pub fn new(recent_limit: usize) -> Self {
        Self { recent_limit }
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    pub fn render<Tz: TimeZone>(&self, feed: &LiveFeed, now: &DateTime<Tz>) -> ViewState<HomeData> {
        feed.state()
            .derive(|records| HomeData::compute(records, self.recent_limit, now))
    }
}
