//! End-to-end order coordination: order service against a live inventory
//! service, including the timeout and invalid-input paths.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use serde_json::{Value, json};

use ordermesh::inventory::{self, state::InventoryState};
use ordermesh::order::{self, client::InventoryClient, state::OrderState};
use ordermesh::stock::StockLedger;

async fn spawn_app(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn spawn_inventory(ledger: StockLedger) -> SocketAddr {
    let _ = ordermesh::metrics::install();
    let state = Arc::new(InventoryState::new(ledger));
    spawn_app(inventory::router(state)).await
}

async fn spawn_order(inventory_url: String, timeout: Duration) -> SocketAddr {
    let _ = ordermesh::metrics::install();
    let client = InventoryClient::new(inventory_url, timeout).unwrap();
    let state = Arc::new(OrderState::new(client));
    spawn_app(order::router(state)).await
}

/// A listener that accepts connections and never answers, to force the
/// coordinator's request timeout.
async fn spawn_stalling_upstream() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::spawn(async move {
                let _socket = socket;
                tokio::time::sleep(Duration::from_secs(60)).await;
            });
        }
    });
    addr
}

async fn place(addr: SocketAddr, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("http://{}/orders", addr))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

/// Read one counter sample out of the rendered exposition text.
fn counter_value(name: &str, labels: &[(&str, &str)]) -> f64 {
    let rendered = ordermesh::metrics::render().expect("recorder installed");
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
        .unwrap_or(0.0)
}

fn orders_total(status: &str) -> f64 {
    counter_value(
        "orders_total",
        &[("service", "order-service"), ("status", status)],
    )
}

#[tokio::test]
async fn placing_an_order_reserves_stock_and_counts_success() {
    let inventory_addr = spawn_inventory(StockLedger::from_entries([("item1", 100u64)])).await;
    let order_addr =
        spawn_order(format!("http://{}", inventory_addr), Duration::from_secs(2)).await;

    let before = orders_total("success");

    let (status, body) = place(order_addr, json!({"item": "item1", "quantity": 30})).await;

    assert_eq!(status, 201);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Order placed!");
    let order_id = body["orderId"].as_str().unwrap();
    assert!(order_id.starts_with("ORDER-") && order_id.len() > "ORDER-".len());

    assert_eq!(orders_total("success") - before, 1.0);

    let ledger: Value = reqwest::get(format!("http://{}/inventory", inventory_addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ledger["item1"], 70);
}

#[tokio::test]
async fn stock_rejections_are_echoed_and_counted() {
    let inventory_addr = spawn_inventory(StockLedger::seeded()).await;
    let order_addr =
        spawn_order(format!("http://{}", inventory_addr), Duration::from_secs(2)).await;

    let before = orders_total("failed_stock");

    let (status, body) = place(order_addr, json!({"item": "item2", "quantity": 1000})).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"success": false, "message": "Insufficient stock"}));

    let (status, body) = place(order_addr, json!({"item": "item9", "quantity": 1})).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"success": false, "message": "Item not found"}));

    assert_eq!(orders_total("failed_stock") - before, 2.0);
}

#[tokio::test]
async fn missing_fields_fail_before_any_network_call() {
    // Nothing listens on the inventory URL: a request that slipped past
    // validation would surface as a 500, not the expected 400.
    let order_addr =
        spawn_order("http://127.0.0.1:9".to_string(), Duration::from_millis(200)).await;

    for body in [
        json!({"item": "item1"}),
        json!({"quantity": 5}),
        json!({"item": "", "quantity": 5}),
        json!({"item": "item1", "quantity": 0}),
        json!({}),
    ] {
        let (status, reply) = place(order_addr, body.clone()).await;
        assert_eq!(status, 400, "body {:?} must be rejected", body);
        assert_eq!(reply, json!({"error": "Missing item or quantity"}));
    }

    // Malformed quantities are rejected at the serde boundary, same path.
    let (status, _) = place(order_addr, json!({"item": "item1", "quantity": -3})).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn upstream_failures_map_to_upstream_error() {
    let before = orders_total("error");

    // Timeout: the upstream accepts the connection and never answers.
    let stall_addr = spawn_stalling_upstream().await;
    let order_addr =
        spawn_order(format!("http://{}", stall_addr), Duration::from_millis(200)).await;

    let (status, body) = place(order_addr, json!({"item": "item1", "quantity": 30})).await;
    assert_eq!(status, 500);
    assert_eq!(
        body,
        json!({"error": "Error communicating with Inventory Service"})
    );
    assert_eq!(orders_total("error") - before, 1.0);

    // Connection refused: nothing listens at all.
    let order_addr =
        spawn_order("http://127.0.0.1:9".to_string(), Duration::from_millis(200)).await;

    let (status, body) = place(order_addr, json!({"item": "item1", "quantity": 1})).await;
    assert_eq!(status, 500);
    assert_eq!(
        body,
        json!({"error": "Error communicating with Inventory Service"})
    );
    assert_eq!(orders_total("error") - before, 2.0);
}
