//! File-backed inventory store.

use std::io;
use std::path::{Path, PathBuf};

use tracing::Dispatch;

use stockkeep_core::{
    DEFAULT_DATA_FILE, DEFAULT_LOW_STOCK_THRESHOLD, InventoryResult, StorageError, StoreConfig,
};

use crate::report::StockReport;
use crate::stock::{Stock, StockCommand, StockEvent};

/// How a [`InventoryStore::load`] call went.
///
/// Every variant other than `Loaded` leaves the store empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { items: usize },
    /// The persistence target does not exist.
    Missing,
    /// The target exists but is not a JSON object of integer quantities.
    Corrupt { reason: String },
    /// The target could not be read for another reason.
    Unreadable { reason: String },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// In-memory stock bound to a JSON persistence target and a log sink.
///
/// A store built with [`InventoryStore::with_dispatch`] logs to that
/// dispatcher only. One built with [`InventoryStore::new`] logs to whatever
/// default dispatcher is in effect when each operation runs.
#[derive(Debug)]
pub struct InventoryStore {
    path: PathBuf,
    stock: Stock,
    low_stock_threshold: i64,
    dispatch: Option<Dispatch>,
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl InventoryStore {
    /// Empty store persisting to `path`.
    ///
    /// The log sink is resolved per call, so a store created before
    /// `stockkeep_observability::init` still logs once init has run.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            stock: Stock::new(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            dispatch: None,
        }
    }

    pub fn with_dispatch(path: impl Into<PathBuf>, dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
            ..Self::new(path)
        }
    }

    pub fn from_config(config: &StoreConfig, dispatch: Dispatch) -> Self {
        let mut store = Self::with_dispatch(config.data_file.clone(), dispatch);
        store.low_stock_threshold = config.low_stock_threshold;
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stock(&self) -> &Stock {
        &self.stock
    }

    pub fn low_stock_threshold(&self) -> i64 {
        self.low_stock_threshold
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    /// Add `qty` of `item`. Fails on an empty name, a non-positive quantity or
    /// overflow; the stock is unchanged on failure.
    pub fn add(&mut self, item: &str, qty: i64) -> InventoryResult<StockEvent> {
        self.execute(StockCommand::Add {
            item: item.to_string(),
            qty,
        })
    }

    /// Remove `qty` of `item`.
    ///
    /// Unknown items are a logged no-op. An item that reaches zero or below is
    /// dropped from the stock. A result outside the integer range is clamped
    /// and logged as a warning.
    pub fn remove(&mut self, item: &str, qty: i64) -> StockEvent {
        if self.stock.removal_saturates(item, qty) {
            self.in_scope(|| {
                tracing::warn!(
                    current = self.stock.quantity(item),
                    qty,
                    "Removing {qty} of {item} saturated the quantity range"
                )
            });
        }
        let event = self.stock.handle_remove(item, qty);
        self.stock.apply(&event);
        self.log_event(&event);
        event
    }

    pub fn get_quantity(&self, item: &str) -> i64 {
        self.stock.quantity(item)
    }

    /// Items strictly below `threshold`, in stock order.
    pub fn low_stock_items(&self, threshold: i64) -> Vec<&str> {
        self.stock.below(threshold)
    }

    /// Items below the configured threshold (5 unless configured otherwise).
    pub fn low_stock(&self) -> Vec<&str> {
        self.low_stock_items(self.low_stock_threshold)
    }

    /// Replace the stock with the contents of the persistence target.
    ///
    /// Never fails: a missing, unreadable or malformed file is logged and leaves
    /// the store empty.
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = match std::fs::read_to_string(&self.path) {
            Ok(text) => match Stock::from_json(&text) {
                Ok(stock) => {
                    self.stock = stock;
                    LoadOutcome::Loaded {
                        items: self.stock.len(),
                    }
                }
                Err(e) => LoadOutcome::Corrupt {
                    reason: e.to_string(),
                },
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => LoadOutcome::Missing,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => LoadOutcome::Corrupt {
                reason: e.to_string(),
            },
            Err(e) => LoadOutcome::Unreadable {
                reason: e.to_string(),
            },
        };

        if !outcome.is_loaded() {
            self.stock = Stock::new();
        }

        let path = self.path.display();
        self.in_scope(|| match &outcome {
            LoadOutcome::Loaded { items } => {
                tracing::info!(items, "Data loaded successfully from {path}")
            }
            LoadOutcome::Missing => {
                tracing::warn!("File {path} not found, starting with empty data.")
            }
            LoadOutcome::Corrupt { reason } => {
                tracing::error!(%reason, "Invalid JSON format in {path}.")
            }
            LoadOutcome::Unreadable { reason } => {
                tracing::error!(%reason, "Could not read {path}, starting with empty data.")
            }
        });

        outcome
    }

    /// Overwrite the persistence target with the whole stock.
    pub fn save(&self) -> Result<(), StorageError> {
        let bytes = self.stock.to_json_pretty()?;
        std::fs::write(&self.path, bytes).map_err(|e| StorageError::write(&self.path, e))?;

        let path = self.path.display();
        self.in_scope(|| {
            tracing::info!(items = self.stock.len(), "Data saved successfully to {path}")
        });
        Ok(())
    }

    pub fn report_view(&self) -> StockReport<'_> {
        StockReport::new(&self.stock)
    }

    /// Print the stock report to stdout.
    pub fn report(&self) -> io::Result<()> {
        self.write_report(&mut io::stdout().lock())
    }

    pub fn write_report<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.report_view())
    }

    fn execute(&mut self, command: StockCommand) -> InventoryResult<StockEvent> {
        let event = self.stock.execute(&command)?;
        self.log_event(&event);
        Ok(event)
    }

    fn log_event(&self, event: &StockEvent) {
        self.in_scope(|| match event {
            StockEvent::ItemAdded { item, qty, total } => {
                tracing::info!(total, "Added {qty} of {item}")
            }
            StockEvent::ItemReduced {
                item,
                qty,
                remaining,
            } => tracing::info!(remaining, "Removed {qty} of {item}"),
            StockEvent::ItemDepleted { item, .. } => {
                tracing::info!("Removed all of {item} (now zero or negative)")
            }
            StockEvent::RemovalIgnored { item, .. } => {
                tracing::warn!("Attempted to remove non-existent item: {item}")
            }
        });
    }

    fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}
