//! User settings for Expensio
//!
//! Display preferences, dashboard sizing and logging defaults.

use serde::{Deserialize, Serialize};

use super::paths::ExpensioPaths;
use crate::error::ExpensioError;
use crate::models::TimeRange;
use crate::storage::{read_json, write_json_atomic};

/// User settings for Expensio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date label format (strftime), rendered in local time
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many expenses the home screen lists
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Range the analytics screen opens with
    #[serde(default)]
    pub default_range: TimeRange,

    /// Poll interval for `watch`, in milliseconds
    #[serde(default = "default_watch_interval_ms")]
    pub watch_interval_ms: u64,

    /// Log filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "£".to_string()
}

fn default_date_format() -> String {
    "%d %b %Y, %H:%M".to_string()
}

fn default_recent_limit() -> usize {
    10
}

fn default_watch_interval_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            recent_limit: default_recent_limit(),
            default_range: TimeRange::default(),
            watch_interval_ms: default_watch_interval_ms(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, writing the defaults on first run
    pub fn load_or_create(paths: &ExpensioPaths) -> Result<Self, ExpensioError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            read_json(&settings_path).map_err(|e| {
                ExpensioError::Config(format!("Failed to load settings: {}", e))
            })
        } else {
            let settings = Settings::default();
            settings.save(paths)?;
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensioPaths) -> Result<(), ExpensioError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "£");
        assert_eq!(settings.recent_limit, 10);
        assert_eq!(settings.default_range, TimeRange::AllTime);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensioPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            currency_symbol: "$".into(),
            recent_limit: 5,
            default_range: TimeRange::ThisMonth,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.recent_limit, 5);
        assert_eq!(loaded.default_range, TimeRange::ThisMonth);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensioPaths::with_base_dir(temp_dir.path().join("fresh"));
        assert!(!paths.settings_file().exists());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.currency_symbol, "£");
        assert!(paths.settings_file().exists());

        let on_disk: Settings =
            serde_json::from_str(&std::fs::read_to_string(paths.settings_file()).unwrap()).unwrap();
        assert_eq!(on_disk.recent_limit, settings.recent_limit);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.date_format, "%d %b %Y, %H:%M");
        assert_eq!(settings.watch_interval_ms, 1000);
    }
}
