//! Gateway router - forwards external client traffic to the owning service.
//!
//! No business logic lives here; the gateway only relays.

pub mod handlers;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware;
use crate::openapi;
use state::GatewayState;

pub const SERVICE: &str = "api-gateway";

/// Build the gateway router with the Swagger UI mounted on `/docs`.
pub fn router(state: Arc<GatewayState>) -> Router {
    let routes = Router::new()
        .route("/api/users", get(handlers::proxy_users))
        .route("/api/inventory", get(handlers::proxy_inventory))
        .route("/api/orders", post(handlers::proxy_orders))
        .with_state(state);

    middleware::instrument(routes, SERVICE).merge(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
    )
}

/// Bind and serve the gateway.
pub async fn serve(port: u16, state: Arc<GatewayState>) -> anyhow::Result<()> {
    let app = router(state);
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("{} failed to bind {}", SERVICE, addr))?;

    tracing::info!("🚀 {} listening on http://{}", SERVICE, addr);
    tracing::info!("📖 API docs: http://{}/docs", addr);
    axum::serve(listener, app)
        .await
        .with_context(|| format!("{} server error", SERVICE))
}
