//! Screen view models
//!
//! Each screen recomputes everything from the latest snapshot held by its
//! [`LiveFeed`]; nothing is patched incrementally.

pub mod analytics;
pub mod history;
pub mod home;
pub mod live;
pub mod state;

pub use analytics::{AnalyticsData, AnalyticsView, CategoryShare};
pub use history::HistoryView;
pub use home::{HomeData, HomeView, DEFAULT_RECENT_LIMIT};
pub use live::LiveFeed;
pub use state::ViewState;
