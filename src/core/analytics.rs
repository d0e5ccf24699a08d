//! Pure transforms from inventory records to chart series.
use crate::core::chart::{
    AggregateBundle, CategorySlice, MovementPoint, StockLevelPoint, SupplierScore,
};
use crate::core::model::{
    InventorySnapshot, StockEntry, StockExit, StockItem, StockStatus, Supplier,
};
use crate::core::window::{DateWindow, is_same_day};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::HashMap;
use tracing::debug;

/// Runs all four transforms against one snapshot.
pub fn build_bundle(snapshot: &InventorySnapshot, window: &DateWindow) -> AggregateBundle {
    AggregateBundle {
        stock_movements: stock_movements(&snapshot.entries, &snapshot.exits, window),
        category_distribution: category_distribution(&snapshot.items),
        supplier_performance: supplier_performance(&snapshot.suppliers, &snapshot.entries),
        stock_level_trends: stock_level_trends(&snapshot.items, window),
    }
}

/// Sums entry and exit values per day of the window.
///
/// Always yields one point per window key, zero-valued when nothing moved.
pub fn stock_movements(
    entries: &[StockEntry],
    exits: &[StockExit],
    window: &DateWindow,
) -> Vec<MovementPoint> {
    let points: Vec<MovementPoint> = window
        .iter()
        .map(|date| {
            let entries_value: Decimal = entries
                .iter()
                .filter(|entry| is_same_day(&entry.entry_date, date))
                .map(|entry| entry.total_value)
                .sum();
            let exits_value: Decimal = exits
                .iter()
                .filter(|exit| is_same_day(&exit.exit_date, date))
                .map(|exit| exit.total_value)
                .sum();
            MovementPoint::new(date, entries_value, exits_value)
        })
        .collect();

    debug!(
        "Computed {} movement points from {} entries and {} exits",
        points.len(),
        entries.len(),
        exits.len()
    );
    points
}

/// Groups items by category, in order of first appearance, with each
/// category's share of the total stock value.
pub fn category_distribution(items: &[StockItem]) -> Vec<CategorySlice> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, usize, Decimal)> = Vec::new();

    for item in items {
        let index = *positions.entry(item.category.as_str()).or_insert_with(|| {
            groups.push((item.category.as_str(), 0, Decimal::ZERO));
            groups.len() - 1
        });
        let group = &mut groups[index];
        group.1 += 1;
        group.2 += item.total_value;
    }

    let grand_total: Decimal = items.iter().map(|item| item.total_value).sum();
    debug!(
        "Grouped {} items into {} categories, total value {grand_total}",
        items.len(),
        groups.len()
    );

    groups
        .into_iter()
        .map(|(category, count, value)| CategorySlice {
            category: category.to_string(),
            count,
            value,
            percentage: share_of(value, grand_total),
        })
        .collect()
}

fn share_of(value: Decimal, total: Decimal) -> f64 {
    if total > Decimal::ZERO {
        (value / total * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    } else {
        0.0
    }
}

/// Scores each supplier by the entries it delivered, highest value first.
///
/// Suppliers with equal totals keep their input order.
pub fn supplier_performance(suppliers: &[Supplier], entries: &[StockEntry]) -> Vec<SupplierScore> {
    let mut scores: Vec<SupplierScore> = suppliers
        .iter()
        .map(|supplier| {
            let (total_orders, total_value) = entries
                .iter()
                .filter(|entry| entry.supplier_id == supplier.id)
                .fold((0, Decimal::ZERO), |(orders, value), entry| {
                    (orders + 1, value + entry.total_value)
                });
            SupplierScore {
                supplier_name: supplier.name.clone(),
                total_orders,
                total_value,
                reliability: supplier.reliability.label().to_string(),
                rating: supplier.rating,
            }
        })
        .collect();

    // Vec::sort_by is stable.
    scores.sort_by(|a, b| b.total_value.cmp(&a.total_value));
    scores
}

/// Reports stock status counts for every day of the window.
///
/// Only the current item list is known, so every point carries today's
/// counts. Historical levels would need point-in-time snapshots from the
/// data layer.
pub fn stock_level_trends(items: &[StockItem], window: &DateWindow) -> Vec<StockLevelPoint> {
    let count_of = |status: StockStatus| {
        items
            .iter()
            .filter(|item| item.stock_status == status)
            .count()
    };
    let in_stock = count_of(StockStatus::InStock);
    let low_stock = count_of(StockStatus::LowStock);
    let out_of_stock = count_of(StockStatus::OutOfStock);

    window
        .iter()
        .map(|date| StockLevelPoint {
            date: date.to_string(),
            total_items: items.len(),
            in_stock,
            low_stock,
            out_of_stock,
        })
        .collect()
}
