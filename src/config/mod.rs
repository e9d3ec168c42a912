//! Configuration module for Expensio
//!
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ExpensioPaths;
pub use settings::Settings;
