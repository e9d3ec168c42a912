//! History screen: every expense, newest first, narrowed by a search query

use crate::aggregate::{search_filter, sort_newest_first};
use crate::models::Expense;

use super::live::LiveFeed;
use super::state::ViewState;

#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    query: String,
}

impl HistoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Matching records newest first; `None` when nothing matches
    pub fn compute(&self, records: &[Expense]) -> Option<Vec<Expense>> {
        let mut matches = search_filter(records, &self.query);
        sort_newest_first(&mut matches);
        (!matches.is_empty()).then_some(matches)
    }

    pub fn render(&self, feed: &LiveFeed) -> ViewState<Vec<Expense>> {
        feed.state().derive(|records| self.compute(records))
    }
}
