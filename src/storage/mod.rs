//! Storage layer for Expensio
//!
//! Provides the record store contract, a JSON file implementation with atomic
//! writes, and live snapshot subscriptions.

pub mod expenses;
pub mod file_io;
pub mod subscription;
pub mod traits;

pub use expenses::JsonExpenseStore;
pub use file_io::{modified_at, read_json, write_json_atomic};
pub use subscription::{StoreEvent, SubscriberRegistry, Subscription};
pub use traits::RecordStore;
