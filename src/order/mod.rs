//! Order service - coordinates order placement.
//!
//! Validates the request, reserves stock from the inventory service over
//! HTTP with a bounded timeout, and maps the outcome to a placement result.

pub mod client;
pub mod handlers;
pub mod state;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{Router, routing::post};
use tokio::net::TcpListener;

use crate::config::OrderConfig;
use crate::metrics::OrderMetrics;
use crate::middleware;
use client::InventoryClient;
use state::OrderState;

pub const SERVICE: &str = "order-service";

/// Build the order router and initialize its outcome counters.
pub fn router(state: Arc<OrderState>) -> Router {
    OrderMetrics::init(SERVICE);

    let routes = Router::new()
        .route("/orders", post(handlers::place_order))
        .with_state(state);

    middleware::instrument(routes, SERVICE)
}

/// Assemble the coordinator state from config.
pub fn build_state(config: &OrderConfig) -> anyhow::Result<Arc<OrderState>> {
    let client = InventoryClient::new(
        config.inventory_url.clone(),
        Duration::from_millis(config.inventory_timeout_ms),
    )
    .context("failed to build inventory client")?;
    Ok(Arc::new(OrderState::new(client)))
}

/// Bind and serve the order service.
pub async fn serve(port: u16, state: Arc<OrderState>) -> anyhow::Result<()> {
    let app = router(state);
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("{} failed to bind {}", SERVICE, addr))?;

    tracing::info!("🚀 {} listening on http://{}", SERVICE, addr);
    axum::serve(listener, app)
        .await
        .with_context(|| format!("{} server error", SERVICE))
}
