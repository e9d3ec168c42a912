//! Path management for Expensio
//!
//! ## Path Resolution Order
//!
//! 1. `EXPENSIO_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/expensio` on Linux, `~/Library/Application Support/expensio`
//!    on macOS, `%APPDATA%\expensio` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ExpensioError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "EXPENSIO_DATA_DIR";

/// Manages all paths used by Expensio
#[derive(Debug, Clone)]
pub struct ExpensioPaths {
    base_dir: PathBuf,
}

impl ExpensioPaths {
    /// Resolve the base directory from the environment or platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ExpensioError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create ExpensioPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the current session
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Get the path to users.json (credentials)
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), ExpensioError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ExpensioError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| ExpensioError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, ExpensioError> {
    ProjectDirs::from("", "", "expensio")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ExpensioError::Config("Could not determine a home directory".into()))
}
