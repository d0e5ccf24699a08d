//! Inventory records as supplied by the data layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub type SupplierId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reliability {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Reliability {
    /// Human-readable label shown next to a supplier.
    pub fn label(&self) -> &'static str {
        match self {
            Reliability::Excellent => "Excellent",
            Reliability::Good => "Good",
            Reliability::Average => "Average",
            Reliability::Poor => "Poor",
        }
    }
}

impl Display for Reliability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub category: String,
    pub total_value: Decimal,
    pub stock_status: StockStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub supplier_id: SupplierId,
    /// ISO-8601 timestamp, at least `YYYY-MM-DD`.
    pub entry_date: String,
    pub total_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockExit {
    /// ISO-8601 timestamp, at least `YYYY-MM-DD`.
    pub exit_date: String,
    pub total_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub reliability: Reliability,
    pub rating: f32,
}

/// The four source collections as read at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventorySnapshot {
    pub items: Vec<StockItem>,
    pub entries: Vec<StockEntry>,
    pub exits: Vec<StockExit>,
    pub suppliers: Vec<Supplier>,
}
