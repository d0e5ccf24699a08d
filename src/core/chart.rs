//! Derived chart series. Built fresh on every aggregation pass.

use rust_decimal::Decimal;
use serde::Serialize;

/// Value moved in and out of stock on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementPoint {
    pub date: String,
    pub entries: Decimal,
    pub exits: Decimal,
    pub net: Decimal,
}

impl MovementPoint {
    pub fn new(date: impl Into<String>, entries: Decimal, exits: Decimal) -> Self {
        Self {
            date: date.into(),
            entries,
            exits,
            net: entries - exits,
        }
    }
}

/// Share of total stock value held by one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub category: String,
    pub count: usize,
    pub value: Decimal,
    /// 0..=100, or 0 when the inventory has no value at all.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierScore {
    pub supplier_name: String,
    pub total_orders: usize,
    pub total_value: Decimal,
    pub reliability: String,
    pub rating: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockLevelPoint {
    pub date: String,
    pub total_items: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

/// All four series computed from the same snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregateBundle {
    pub stock_movements: Vec<MovementPoint>,
    pub category_distribution: Vec<CategorySlice>,
    pub supplier_performance: Vec<SupplierScore>,
    pub stock_level_trends: Vec<StockLevelPoint>,
}
