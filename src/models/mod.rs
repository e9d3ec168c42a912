//! Core data models for Expensio
//!
//! Expense records as persisted by the record store, the signed-in identity,
//! and the derived aggregates computed from them.

pub mod expense;
pub mod identity;
pub mod ids;
pub mod money;
pub mod range;
pub mod summary;

pub use expense::{Expense, NewExpense, DEFAULT_CATEGORY};
pub use identity::Identity;
pub use ids::{ExpenseId, UserId};
pub use money::{Money, MoneyParseError};
pub use range::TimeRange;
pub use summary::{CategorySummary, PeriodTotals};
