use rust_decimal::Decimal;
use std::fs;
use stock_charts::core::config::ChartConfig;
use stock_charts::core::insights::MovementTrend;
use stock_charts::core::model::{StockEntry, StockItem, StockStatus};
use stock_charts::{InventorySnapshot, InventoryStore};

#[test_log::test(tokio::test)]
async fn test_dashboard_from_config_file() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(
        config_file.path(),
        r#"
        window:
          days: 3
          end_date: 2024-01-07
        insights:
          top_suppliers: 1
          sparse_category_threshold: 2
    "#,
    )
    .expect("Failed to write config file");
    let config = ChartConfig::load_from_path(config_file.path()).unwrap();

    let store = InventoryStore::from_snapshot(InventorySnapshot {
        items: vec![
            StockItem {
                category: "Tools".to_string(),
                total_value: Decimal::from(80),
                stock_status: StockStatus::InStock,
            },
            StockItem {
                category: "Tools".to_string(),
                total_value: Decimal::from(20),
                stock_status: StockStatus::InStock,
            },
            StockItem {
                category: "Glue".to_string(),
                total_value: Decimal::from(300),
                stock_status: StockStatus::LowStock,
            },
        ],
        entries: vec![StockEntry {
            supplier_id: 7,
            entry_date: "2024-01-06T12:00:00".to_string(),
            total_value: Decimal::from(90),
        }],
        ..Default::default()
    });

    let (bundle, metrics) = stock_charts::dashboard(&store, &config).await.unwrap();

    assert_eq!(bundle.stock_movements.len(), 3);
    assert_eq!(bundle.stock_movements[1].date, "2024-01-06");
    assert_eq!(bundle.stock_movements[1].entries, Decimal::from(90));
    assert_eq!(metrics.movement.net, Decimal::from(90));
    assert_eq!(metrics.movement.average_net, Decimal::from(30));
    assert_eq!(metrics.trend, MovementTrend::Rising);
    assert_eq!(metrics.top_category.map(|c| c.category), Some("Glue".to_string()));
    assert_eq!(metrics.sparse_categories, vec!["Glue"]);
    assert!(metrics.top_suppliers.is_empty());

    let json = serde_json::to_value(&bundle).unwrap();
    assert_eq!(json["category_distribution"][1]["percentage"], 75.0);
}
