//! Expense record model
//!
//! An expense is created once by the record store and never edited afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ExpenseId, UserId};
use super::money::Money;

/// Category used when a stored record carries none
pub const DEFAULT_CATEGORY: &str = "General";

/// A persisted expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Assigned by the store on creation
    pub id: ExpenseId,

    /// The user who created the record
    pub owner: UserId,

    pub title: String,

    /// Free-text label, matched exactly when grouping
    pub category: String,

    /// Always positive for records accepted by the entry form
    pub amount: Money,

    /// Assigned by the store on creation
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Case-insensitive substring match on title or category
    ///
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

/// Fields supplied by the caller when creating an expense
///
/// The id and the timestamp are deliberately absent: the store assigns both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub owner: UserId,
    pub title: String,
    pub category: String,
    pub amount: Money,
}

impl NewExpense {
    pub fn new(
        owner: UserId,
        title: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            owner,
            title: title.into(),
            category: category.into(),
            amount,
        }
    }

    /// Turn into a stored record with store-assigned id and timestamp
    pub fn into_expense(self, id: ExpenseId, created_at: DateTime<Utc>) -> Expense {
        Expense {
            id,
            owner: self.owner,
            title: self.title,
            category: self.category,
            amount: self.amount,
            created_at,
        }
    }
}
