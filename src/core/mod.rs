//! Chart-data types, transforms and the inventory source abstraction

pub mod analytics;
pub mod chart;
pub mod config;
pub mod error;
pub mod insights;
pub mod log;
pub mod model;
pub mod source;
pub mod window;

// Re-export main types for cleaner imports
pub use chart::{AggregateBundle, CategorySlice, MovementPoint, StockLevelPoint, SupplierScore};
pub use error::{ChartError, SourceKind};
pub use model::{
    InventorySnapshot, Reliability, StockEntry, StockExit, StockItem, StockStatus, Supplier,
    SupplierId,
};
pub use source::{ChangeStream, Collection};
pub use window::DateWindow;
