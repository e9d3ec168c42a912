//! Expensio - personal expense tracking
//!
//! This library provides the core of the Expensio expense tracker: recording
//! expenses against a signed-in identity, and turning the flat list of records
//! into period totals, a searchable history and per-category breakdowns.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `aggregate`: Pure range filtering, totals, grouping and sorting
//! - `auth`: Authentication provider contract and local implementation
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, money, ids, identity)
//! - `storage`: Record store contract, JSON file store and live subscriptions
//! - `services`: Business logic layer
//! - `validation`: Entry-time form checks
//! - `views`: Screen view models driven by live snapshots
//! - `display`: Terminal formatting
//! - `export`: CSV export
//! - `cli`: Command handlers for the `expensio` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expensio::config::{ExpensioPaths, Settings};
//! use expensio::storage::JsonExpenseStore;
//!
//! let paths = ExpensioPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = JsonExpenseStore::open(paths.expenses_file())?;
//! ```

pub mod aggregate;
pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;
pub mod views;

pub use error::{ExpensioError, ExpensioResult};
