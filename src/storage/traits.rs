//! Record store contract
//!
//! Screens and services talk to the store only through this trait, so the JSON
//! file store can be swapped for a remote document database.

use crate::error::ExpensioResult;
use crate::models::{Expense, NewExpense, UserId};

use super::subscription::Subscription;

pub trait RecordStore {
    /// Persist a new expense; the store assigns its id and timestamp
    fn create(&self, new: NewExpense) -> ExpensioResult<Expense>;

    /// Current expenses owned by `owner`, in no particular order
    fn query(&self, owner: &UserId) -> ExpensioResult<Vec<Expense>>;

    /// Start receiving full snapshots of `owner`'s expenses
    ///
    /// The first event on the returned handle is the current snapshot.
    fn subscribe(&self, owner: &UserId) -> ExpensioResult<Subscription>;
}
