//! Inventory tracking: an ordered item → quantity mapping with whole-file JSON
//! persistence and low-stock reporting.
//!
//! [`Stock`] holds the rules (pure, no IO). [`InventoryStore`] binds a stock to
//! a file path and a log sink.

pub mod report;
pub mod stock;
pub mod store;

pub use report::{REPORT_HEADER, StockReport};
pub use stock::{Stock, StockCommand, StockEvent};
pub use store::{InventoryStore, LoadOutcome};
