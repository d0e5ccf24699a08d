pub mod memory;

use crate::aggregator::ChartAggregator;
use crate::core::model::{InventorySnapshot, StockEntry, StockExit, StockItem, Supplier};
use crate::core::window::DateWindow;
use memory::MemoryCollection;
use std::sync::Arc;

/// The four inventory collections held in memory.
#[derive(Clone, Default)]
pub struct InventoryStore {
    pub items: Arc<MemoryCollection<StockItem>>,
    pub entries: Arc<MemoryCollection<StockEntry>>,
    pub exits: Arc<MemoryCollection<StockExit>>,
    pub suppliers: Arc<MemoryCollection<Supplier>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: InventorySnapshot) -> Self {
        Self {
            items: Arc::new(MemoryCollection::with_records(snapshot.items)),
            entries: Arc::new(MemoryCollection::with_records(snapshot.entries)),
            exits: Arc::new(MemoryCollection::with_records(snapshot.exits)),
            suppliers: Arc::new(MemoryCollection::with_records(snapshot.suppliers)),
        }
    }

    /// An aggregator reading from these collections.
    pub fn aggregator(&self, window: DateWindow) -> ChartAggregator {
        ChartAggregator::new(
            self.items.clone(),
            self.entries.clone(),
            self.exits.clone(),
            self.suppliers.clone(),
            window,
        )
    }
}
