//! Store configuration.

use std::path::PathBuf;

use crate::error::ConfigError;

/// File the store persists to when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "inventory.json";

/// Quantity below which an item counts as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

pub const DATA_FILE_ENV: &str = "STOCKKEEP_DATA_FILE";
pub const LOW_STOCK_THRESHOLD_ENV: &str = "STOCKKEEP_LOW_STOCK_THRESHOLD";

/// Settings for an inventory store instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Persistence target (whole-file JSON).
    pub data_file: PathBuf,
    /// Threshold used by `low_stock()` when the caller does not pass one.
    pub low_stock_threshold: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl StoreConfig {
    /// Read overrides from the process environment; unset keys keep defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(DATA_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            config.data_file = PathBuf::from(path);
        }

        if let Some(raw) = lookup(LOW_STOCK_THRESHOLD_ENV) {
            config.low_stock_threshold = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(LOW_STOCK_THRESHOLD_ENV, raw.as_str()))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = StoreConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.data_file, PathBuf::from("inventory.json"));
        assert_eq!(config.low_stock_threshold, 5);
    }

    #[test]
    fn overrides_are_read() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (DATA_FILE_ENV, "/tmp/stock.json"),
            (LOW_STOCK_THRESHOLD_ENV, " 12 "),
        ]))
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/stock.json"));
        assert_eq!(config.low_stock_threshold, 12);
    }

    #[test]
    fn blank_data_file_keeps_default() {
        let config = StoreConfig::from_lookup(lookup_from(&[(DATA_FILE_ENV, "  ")])).unwrap();
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn non_integer_threshold_is_rejected() {
        let err = StoreConfig::from_lookup(lookup_from(&[(LOW_STOCK_THRESHOLD_ENV, "five")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::invalid(LOW_STOCK_THRESHOLD_ENV, "five"));
    }
}
