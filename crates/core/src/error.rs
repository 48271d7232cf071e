//! Error model for stock mutations, persistence and configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used by stock mutations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Failure of a stock mutation.
///
/// These are raised synchronously by the offending call and leave the stock
/// untouched. Persistence problems are reported through [`StorageError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// An argument failed validation (empty item name, non-positive quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The resulting quantity does not fit the integer range.
    #[error("quantity overflow for item '{0}'")]
    Overflow(String),
}

impl InventoryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn overflow(item: impl Into<String>) -> Self {
        Self::Overflow(item.into())
    }
}

/// Failure while writing the persistence target.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode stock as JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Malformed configuration value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}

impl ConfigError {
    pub fn invalid(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_renders_message() {
        let err = InventoryError::validation("quantity must be greater than zero");
        assert_eq!(
            err.to_string(),
            "validation failed: quantity must be greater than zero"
        );
    }

    #[test]
    fn write_error_keeps_path_and_source() {
        let err = StorageError::write(
            "inventory.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("inventory.json"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn config_error_quotes_value() {
        let err = ConfigError::invalid("STOCKKEEP_LOW_STOCK_THRESHOLD", "five");
        assert_eq!(
            err.to_string(),
            "invalid value for STOCKKEEP_LOW_STOCK_THRESHOLD: \"five\""
        );
    }
}
