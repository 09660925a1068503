//! Order placement handler.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::metrics::OrderMetrics;

use super::SERVICE;
use super::client::{InventoryCallError, ReserveOutcome};
use super::state::OrderState;
use super::types::{ErrorReply, PlaceOrderRequest, PlacedResponse, StockRejectionResponse};

/// Place order endpoint
///
/// POST /orders
///
/// Validates input, reserves stock from the inventory service synchronously,
/// and maps the outcome. There is no compensation step: if inventory commits
/// the decrement but the response is lost in transit, stock stays decremented
/// with no order recorded. The coordinator reports `upstream_error` without
/// knowing which of the two happened, and does not retry.
#[utoipa::path(
    post,
    path = "/orders",
    request_body(content = String, description = "Order request JSON: {item, quantity}", content_type = "application/json"),
    responses(
        (status = 201, description = "Order placed", content_type = "application/json"),
        (status = 400, description = "Missing field or stock failure"),
        (status = 500, description = "Error communicating with the inventory service")
    ),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<Arc<OrderState>>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Response {
    // 1. Validate input before touching the network. Only the generic HTTP
    // request metric fires on this path, never a stock-outcome label.
    let (item, quantity) = match payload {
        Ok(Json(PlaceOrderRequest {
            item: Some(item),
            quantity: Some(quantity),
        })) if !item.is_empty() && quantity.get() > 0 => (item, quantity.get()),
        Ok(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorReply::new("Missing item or quantity")),
            )
                .into_response();
        }
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorReply::new(rejection.body_text())),
            )
                .into_response();
        }
    };

    tracing::info!("Received order for {} of {}", quantity, item);

    // 2. Reserve stock synchronously. The only suspension point in the flow.
    match state.inventory.reserve(&item, quantity).await {
        Ok(ReserveOutcome::Reserved { new_stock }) => {
            let order_id = state.next_order_id();
            OrderMetrics::record_outcome(SERVICE, "success");
            OrderMetrics::record_units(SERVICE, quantity);
            tracing::info!(
                "Inventory reduced successfully ({} left). Order {} placed.",
                new_stock,
                order_id
            );
            (
                StatusCode::CREATED,
                Json(PlacedResponse {
                    success: true,
                    order_id,
                    message: "Order placed!".to_string(),
                }),
            )
                .into_response()
        }
        Ok(ReserveOutcome::Rejected { message }) => {
            OrderMetrics::record_outcome(SERVICE, "failed_stock");
            tracing::info!("Failed to reduce inventory: {}. Order not placed.", message);
            (
                StatusCode::BAD_REQUEST,
                Json(StockRejectionResponse {
                    success: false,
                    message,
                }),
            )
                .into_response()
        }
        Err(err) => {
            OrderMetrics::record_outcome(SERVICE, "error");
            let detail = match &err {
                InventoryCallError::Transport(e) => e.to_string(),
                InventoryCallError::UnreadableResponse { status } => {
                    format!("unreadable response, status {}", status)
                }
            };
            tracing::error!("Error communicating with Inventory Service: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorReply::new("Error communicating with Inventory Service")),
            )
                .into_response()
        }
    }
}
