use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use stockkeep_core::{InventoryError, InventoryResult};

/// Mapping of item name to quantity, in insertion order.
///
/// Every quantity written through [`Stock::apply`] is strictly positive: an
/// item that would drop to zero or below is removed instead. Stock decoded
/// from JSON is taken verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stock(IndexMap<String, i64>);

/// Command: requested stock change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockCommand {
    Add { item: String, qty: i64 },
    Remove { item: String, qty: i64 },
}

/// Event: what a handled command does to the stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockEvent {
    ItemAdded { item: String, qty: i64, total: i64 },
    ItemReduced { item: String, qty: i64, remaining: i64 },
    /// The item reached zero or went negative and was dropped.
    ItemDepleted { item: String, qty: i64 },
    /// Removal of an item that is not in stock.
    RemovalIgnored { item: String, qty: i64 },
}

impl StockEvent {
    pub fn item(&self) -> &str {
        match self {
            StockEvent::ItemAdded { item, .. }
            | StockEvent::ItemReduced { item, .. }
            | StockEvent::ItemDepleted { item, .. }
            | StockEvent::RemovalIgnored { item, .. } => item,
        }
    }
}

impl Stock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity on hand; absent items report zero.
    pub fn quantity(&self, item: &str) -> i64 {
        self.0.get(item).copied().unwrap_or(0)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.0.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.0.iter().map(|(item, qty)| (item.as_str(), *qty))
    }

    /// Items whose quantity is strictly below `threshold`, in stock order.
    pub fn below(&self, threshold: i64) -> Vec<&str> {
        self.iter()
            .filter(|(_, qty)| *qty < threshold)
            .map(|(item, _)| item)
            .collect()
    }

    /// Decide the event for `command` without mutating.
    pub fn handle(&self, command: &StockCommand) -> InventoryResult<StockEvent> {
        match command {
            StockCommand::Add { item, qty } => self.handle_add(item, *qty),
            StockCommand::Remove { item, qty } => Ok(self.handle_remove(item, *qty)),
        }
    }

    /// Evolve state from a single event.
    pub fn apply(&mut self, event: &StockEvent) {
        match event {
            StockEvent::ItemAdded { item, total, .. } => {
                self.0.insert(item.clone(), *total);
            }
            StockEvent::ItemReduced {
                item, remaining, ..
            } => {
                self.0.insert(item.clone(), *remaining);
            }
            StockEvent::ItemDepleted { item, .. } => {
                self.0.shift_remove(item);
            }
            StockEvent::RemovalIgnored { .. } => {}
        }
    }

    /// Handle + apply in one step.
    pub fn execute(&mut self, command: &StockCommand) -> InventoryResult<StockEvent> {
        let event = self.handle(command)?;
        self.apply(&event);
        Ok(event)
    }

    fn handle_add(&self, item: &str, qty: i64) -> InventoryResult<StockEvent> {
        if item.is_empty() {
            return Err(InventoryError::validation("item name cannot be empty"));
        }
        if qty <= 0 {
            return Err(InventoryError::validation(
                "quantity must be greater than zero",
            ));
        }

        let total = self
            .quantity(item)
            .checked_add(qty)
            .ok_or_else(|| InventoryError::overflow(item))?;

        Ok(StockEvent::ItemAdded {
            item: item.to_string(),
            qty,
            total,
        })
    }

    /// Whether removing `qty` of a stocked `item` falls outside the integer
    /// range and gets clamped.
    pub fn removal_saturates(&self, item: &str, qty: i64) -> bool {
        self.0
            .get(item)
            .is_some_and(|current| current.checked_sub(qty).is_none())
    }

    // No quantity checks here: a missing item ignores `qty` entirely, and a
    // present one takes it at face value (zero or negative included).
    pub(crate) fn handle_remove(&self, item: &str, qty: i64) -> StockEvent {
        let Some(current) = self.0.get(item).copied() else {
            return StockEvent::RemovalIgnored {
                item: item.to_string(),
                qty,
            };
        };

        let remaining = current.saturating_sub(qty);
        if remaining <= 0 {
            StockEvent::ItemDepleted {
                item: item.to_string(),
                qty,
            }
        } else {
            StockEvent::ItemReduced {
                item: item.to_string(),
                qty,
                remaining,
            }
        }
    }

    /// Encode as a JSON object with 4-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }

    /// Decode a JSON object of item name to integer quantity.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for Stock {
    fn from_iter<T: IntoIterator<Item = (K, i64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
