//! `stockkeep-core` — shared building blocks.
//!
//! Error taxonomy and store configuration. No IO beyond reading the
//! environment.

pub mod config;
pub mod error;

pub use config::{DEFAULT_DATA_FILE, DEFAULT_LOW_STOCK_THRESHOLD, StoreConfig};
pub use error::{ConfigError, InventoryError, InventoryResult, StorageError};
