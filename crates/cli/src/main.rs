use anyhow::Context;

use stockkeep_core::{InventoryResult, StoreConfig};
use stockkeep_inventory::InventoryStore;
use stockkeep_observability::LogConfig;

fn main() -> anyhow::Result<()> {
    let dispatch = stockkeep_observability::init(&LogConfig::from_env())
        .context("failed to initialise logging")?;

    let config = StoreConfig::from_env().context("invalid store configuration")?;
    let mut store = InventoryStore::from_config(&config, dispatch);
    store.load();

    if let Err(e) = demo_mutations(&mut store) {
        tracing::error!("Error: {e}");
    }

    println!("Apple stock: {}", store.get_quantity("apple"));
    println!("Low items: {:?}", store.low_stock());

    store
        .save()
        .with_context(|| format!("failed to save {}", store.path().display()))?;
    store.report().context("failed to print report")?;

    Ok(())
}

fn demo_mutations(store: &mut InventoryStore) -> InventoryResult<()> {
    store.add("apple", 10)?;
    store.add("banana", 2)?;
    store.remove("apple", 3);
    // Not in stock.
    store.remove("orange", 1);
    Ok(())
}
