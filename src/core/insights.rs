//! Headline figures shown alongside the charts.
use crate::core::chart::{AggregateBundle, CategorySlice, StockLevelPoint, SupplierScore};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_SUPPLIERS: usize = 5;
pub const DEFAULT_SPARSE_CATEGORY_THRESHOLD: usize = 5;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct InsightOptions {
    #[serde(default = "default_top_suppliers")]
    pub top_suppliers: usize,
    /// Categories holding fewer items than this are reported as sparse.
    #[serde(default = "default_sparse_category_threshold")]
    pub sparse_category_threshold: usize,
}

fn default_top_suppliers() -> usize {
    DEFAULT_TOP_SUPPLIERS
}

fn default_sparse_category_threshold() -> usize {
    DEFAULT_SPARSE_CATEGORY_THRESHOLD
}

impl Default for InsightOptions {
    fn default() -> Self {
        InsightOptions {
            top_suppliers: DEFAULT_TOP_SUPPLIERS,
            sparse_category_threshold: DEFAULT_SPARSE_CATEGORY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MovementTrend {
    Rising,
    Flat,
    Falling,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementTotals {
    pub entries: Decimal,
    pub exits: Decimal,
    pub net: Decimal,
    /// Mean net movement per window day.
    pub average_net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub movement: MovementTotals,
    pub trend: MovementTrend,
    pub category_count: usize,
    pub top_category: Option<CategorySlice>,
    pub sparse_categories: Vec<String>,
    pub latest_stock_level: Option<StockLevelPoint>,
    pub top_suppliers: Vec<SupplierScore>,
}

pub fn key_metrics(bundle: &AggregateBundle, options: &InsightOptions) -> KeyMetrics {
    let movement = movement_totals(bundle);
    let trend = if movement.net > Decimal::ZERO {
        MovementTrend::Rising
    } else if movement.net < Decimal::ZERO {
        MovementTrend::Falling
    } else {
        MovementTrend::Flat
    };

    KeyMetrics {
        movement,
        trend,
        category_count: bundle.category_distribution.len(),
        top_category: top_category(&bundle.category_distribution).cloned(),
        sparse_categories: bundle
            .category_distribution
            .iter()
            .filter(|slice| slice.count < options.sparse_category_threshold)
            .map(|slice| slice.category.clone())
            .collect(),
        latest_stock_level: bundle.stock_level_trends.last().cloned(),
        top_suppliers: bundle
            .supplier_performance
            .iter()
            .take(options.top_suppliers)
            .cloned()
            .collect(),
    }
}

fn movement_totals(bundle: &AggregateBundle) -> MovementTotals {
    let points = &bundle.stock_movements;
    let entries: Decimal = points.iter().map(|p| p.entries).sum();
    let exits: Decimal = points.iter().map(|p| p.exits).sum();
    let net = entries - exits;
    let average_net = if points.is_empty() {
        Decimal::ZERO
    } else {
        net / Decimal::from(points.len())
    };

    MovementTotals {
        entries,
        exits,
        net,
        average_net,
    }
}

// First slice wins on equal values.
fn top_category(slices: &[CategorySlice]) -> Option<&CategorySlice> {
    slices.iter().fold(None, |best, slice| match best {
        Some(current) if current.value >= slice.value => Some(current),
        _ => Some(slice),
    })
}
