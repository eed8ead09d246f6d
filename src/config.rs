//! Runtime settings read from the environment
//!
//! There is no configuration file; everything is an environment variable
//! with a default.

use std::path::PathBuf;

/// Application name attached to notifications unless overridden
pub const DEFAULT_APP_NAME: &str = "notification-sender";

/// Log level used when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";

const APP_NAME_VAR: &str = "NOTIFICATION_SENDER_APP_NAME";
const ICON_VAR: &str = "NOTIFICATION_SENDER_ICON";
const LOG_LEVEL_VAR: &str = "RUST_LOG";

/// Settings resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Application name shown by the notification service
    pub app_name: String,
    /// Icon name or path, if any
    pub icon: Option<String>,
    /// Log filter level for the file log
    pub log_level: String,
    /// Directory holding the rolling log files
    pub log_dir: PathBuf,
}

impl Config {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            app_name: get(APP_NAME_VAR).unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            icon: get(ICON_VAR),
            log_level: get(LOG_LEVEL_VAR).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_dir: default_log_dir(),
        }
    }
}

/// Get the log directory path
fn default_log_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("/tmp/notification-sender/logs"),
        |dirs| dirs.cache_dir().join("notification-sender").join("logs"),
    )
}
