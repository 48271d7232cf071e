//! Logging configuration.

use std::path::PathBuf;

pub const LOG_FILE_ENV: &str = "STOCKKEEP_LOG_FILE";
pub const LOG_FORMAT_ENV: &str = "STOCKKEEP_LOG_FORMAT";
pub const FILTER_ENV: &str = "RUST_LOG";

pub const DEFAULT_LOG_FILE: &str = "inventory.log";
pub const DEFAULT_FILTER: &str = "info";

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Appended to; created if missing.
    File(PathBuf),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// `<timestamp> <LEVEL> <message> <fields>`
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub target: LogTarget,
    /// `EnvFilter` directive string, e.g. `info` or `stockkeep_inventory=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            target: LogTarget::File(PathBuf::from(DEFAULT_LOG_FILE)),
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LogConfig {
    pub fn stderr() -> Self {
        Self {
            target: LogTarget::Stderr,
            ..Self::default()
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            target: LogTarget::File(path.into()),
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Read overrides from the process environment.
    ///
    /// `STOCKKEEP_LOG_FILE=-` sends records to stderr. Unknown formats fall back
    /// to text.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match lookup(LOG_FILE_ENV).as_deref().map(str::trim) {
            Some("-") => config.target = LogTarget::Stderr,
            Some(path) if !path.is_empty() => config.target = LogTarget::File(PathBuf::from(path)),
            _ => {}
        }

        if let Some(filter) = lookup(FILTER_ENV).filter(|f| !f.trim().is_empty()) {
            config.filter = filter;
        }

        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            config.format = if format.trim().eq_ignore_ascii_case("json") {
                LogFormat::Json
            } else {
                LogFormat::Text
            };
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_logs_to_inventory_log_at_info() {
        let config = LogConfig::from_lookup(|_| None);
        assert_eq!(config.target, LogTarget::File(PathBuf::from("inventory.log")));
        assert_eq!(config.filter, "info");
        assert_eq!(config.format, LogFormat::Text);
    }

    #[test]
    fn dash_selects_stderr() {
        let config = LogConfig::from_lookup(|key| (key == LOG_FILE_ENV).then(|| "-".to_string()));
        assert_eq!(config.target, LogTarget::Stderr);
    }

    #[test]
    fn filter_and_format_are_read() {
        let config = LogConfig::from_lookup(|key| match key {
            FILTER_ENV => Some("warn".to_string()),
            LOG_FORMAT_ENV => Some("JSON".to_string()),
            _ => None,
        });
        assert_eq!(config.filter, "warn");
        assert_eq!(config.format, LogFormat::Json);
    }
}
