//! Scrape-contract tests: the first scrape already carries a sample for
//! every domain instrument registered at service start, and invalid order
//! input emits no stock-outcome metric.
//!
//! These assertions read exact values, so they live in their own binary
//! where no other test moves the shared recorder's domain instruments.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use serde_json::json;

use ordermesh::inventory::{self, state::InventoryState};
use ordermesh::order::{self, client::InventoryClient, state::OrderState};
use ordermesh::stock::StockLedger;
use ordermesh::user::{self, UserState};

async fn spawn_app(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn sample_value(rendered: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    rendered
        .lines()
        .filter(|line| line.starts_with(&format!("{}{{", name)))
        .find(|line| {
            labels
                .iter()
                .all(|(k, v)| line.contains(&format!("{}=\"{}\"", k, v)))
        })
        .and_then(|line| line.rsplit(' ').next())
        .and_then(|value| value.parse().ok())
}

#[tokio::test]
async fn first_scrape_carries_start_of_process_samples() {
    let _ = ordermesh::metrics::install();

    // Building the routers is what registers/initializes the instruments.
    let inventory_addr = spawn_app(inventory::router(Arc::new(InventoryState::new(
        StockLedger::seeded(),
    ))))
    .await;
    let client = InventoryClient::new(
        format!("http://{}", inventory_addr),
        std::time::Duration::from_secs(2),
    )
    .unwrap();
    spawn_app(order::router(Arc::new(OrderState::new(client)))).await;
    spawn_app(user::router(Arc::new(UserState::seeded()))).await;

    // No traffic yet: scrape straight off the recorder.
    let rendered = ordermesh::metrics::render().expect("recorder installed");

    for (item, seed) in [("item1", 100.0), ("item2", 50.0), ("item3", 200.0)] {
        assert_eq!(
            sample_value(
                &rendered,
                "inventory_stock_level_total",
                &[("service", "inventory-service"), ("item", item)],
            ),
            Some(seed),
            "missing seed gauge for {}",
            item
        );
    }

    assert_eq!(
        sample_value(
            &rendered,
            "inventory_units_reserved_total",
            &[("service", "inventory-service")],
        ),
        Some(0.0)
    );

    for status in ["success", "failed_stock", "error"] {
        assert_eq!(
            sample_value(
                &rendered,
                "orders_total",
                &[("service", "order-service"), ("status", status)],
            ),
            Some(0.0),
            "missing zeroed orders_total for {}",
            status
        );
    }

    assert_eq!(
        sample_value(
            &rendered,
            "orders_value_total",
            &[("service", "order-service")],
        ),
        Some(0.0)
    );

    assert_eq!(
        sample_value(&rendered, "users_total", &[("service", "user-service")]),
        Some(2.0)
    );
}

#[tokio::test]
async fn invalid_order_input_emits_no_stock_outcome_metric() {
    let _ = ordermesh::metrics::install();

    let client = InventoryClient::new(
        "http://127.0.0.1:9".to_string(),
        std::time::Duration::from_millis(100),
    )
    .unwrap();
    let order_addr = spawn_app(order::router(Arc::new(OrderState::new(client)))).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/orders", order_addr))
        .json(&json!({"item": "item1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let rendered = ordermesh::metrics::render().expect("recorder installed");
    for status in ["success", "failed_stock", "error"] {
        assert_eq!(
            sample_value(
                &rendered,
                "orders_total",
                &[("service", "order-service"), ("status", status)],
            ),
            Some(0.0),
            "invalid input must not move orders_total ({})",
            status
        );
    }

    // The generic HTTP request metric still fires, templated route label.
    assert!(rendered.contains("http_requests_total"));
    assert!(rendered.contains("route=\"/orders\""));
}
