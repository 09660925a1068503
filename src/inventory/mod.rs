//! Inventory service - authoritative owner of stock levels.
//!
//! The reserve operation behind `POST /inventory/reduce` is the only
//! sanctioned mutator of the ledger.

pub mod handlers;
pub mod state;
pub mod types;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;

use crate::middleware;
use state::InventoryState;

pub const SERVICE: &str = "inventory-service";

/// Build the inventory router and initialize its domain instruments.
pub fn router(state: Arc<InventoryState>) -> Router {
    state.init_instruments();

    let routes = Router::new()
        .route("/inventory", get(handlers::list_stock))
        .route("/inventory/reduce", post(handlers::reduce_stock))
        .with_state(state);

    middleware::instrument(routes, SERVICE)
}

/// Bind and serve the inventory service.
pub async fn serve(port: u16, state: Arc<InventoryState>) -> anyhow::Result<()> {
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
