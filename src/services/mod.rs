//! Service layer for Expensio
//!
//! The service layer provides business logic on top of the record store and
//! the auth provider, handling validation before anything is submitted.

pub mod auth;
pub mod expense;

pub use auth::AuthService;
pub use expense::ExpenseService;
