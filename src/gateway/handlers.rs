//! Gateway forwarding handlers.
//!
//! Pure request forwarding: a 2xx upstream JSON body is relayed as-is, and
//! any upstream failure (transport error or non-2xx status) collapses into
//! the generic communication-error wrapper. The gateway never interprets
//! upstream business failures.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::state::GatewayState;

#[derive(Debug, Serialize)]
struct CommunicationError {
    error: String,
}

/// Forward users listing
///
/// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "User records from the user service", content_type = "application/json"),
        (status = 500, description = "Error communicating with User Service")
    ),
    tag = "Gateway"
)]
pub async fn proxy_users(State(state): State<Arc<GatewayState>>) -> Response {
    tracing::info!("Request to: GET /api/users");
    let request = state.http.get(format!("{}/users", state.user_url));
    forward(request, "User").await
}

/// Forward inventory listing
///
/// GET /api/inventory
#[utoipa::path(
    get,
    path = "/api/inventory",
    responses(
        (status = 200, description = "Stock ledger from the inventory service", content_type = "application/json"),
        (status = 500, description = "Error communicating with Inventory Service")
    ),
    tag = "Gateway"
)]
pub async fn proxy_inventory(State(state): State<Arc<GatewayState>>) -> Response {
    tracing::info!("Request to: GET /api/inventory");
    let request = state.http.get(format!("{}/inventory", state.inventory_url));
    forward(request, "Inventory").await
}

/// Forward order placement
///
/// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body(content = String, description = "Order request JSON, passed through", content_type = "application/json"),
    responses(
        (status = 200, description = "Placement result from the order service", content_type = "application/json"),
        (status = 500, description = "Error communicating with Order Service")
    ),
    tag = "Gateway"
)]
pub async fn proxy_orders(
    State(state): State<Arc<GatewayState>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    tracing::info!("Request to: POST /api/orders");
    let request = state
        .http
        .post(format!("{}/orders", state.order_url))
        .json(&body);
    forward(request, "Order").await
}

async fn forward(request: reqwest::RequestBuilder, upstream: &str) -> Response {
    let result = async {
        request
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await
    }
    .await;

    match result {
        Ok(body) => Json(body).into_response(),
        Err(err) => {
            tracing::error!("Error communicating with {} Service: {}", upstream, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CommunicationError {
                    error: format!("Error communicating with {} Service", upstream),
                }),
            )
                .into_response()
        }
    }
}
