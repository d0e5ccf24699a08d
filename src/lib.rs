pub mod aggregator;
pub mod core;
pub mod store;

pub use aggregator::{ChartAggregator, Subscription};
pub use crate::core::{
    AggregateBundle, ChartError, Collection, DateWindow, InventorySnapshot, SourceKind,
};
pub use store::InventoryStore;

use crate::core::config::ChartConfig;
use crate::core::insights::{KeyMetrics, key_metrics};
use anyhow::Result;
use chrono::Local;
use tracing::debug;

/// Computes the chart bundle and its headline metrics for a store, using the
/// window and options from `config`.
pub async fn dashboard(
    store: &InventoryStore,
    config: &ChartConfig,
) -> Result<(AggregateBundle, KeyMetrics)> {
    let window = config.window(Local::now().date_naive())?;
    debug!("Building dashboard over {} days", window.len());

    let bundle = store.aggregator(window).compute_once().await?;
    let metrics = key_metrics(&bundle, &config.insights);
    Ok((bundle, metrics))
}
