//! Inventory handlers (list, reduce)

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::metrics::StockMetrics;
use crate::stock::StockError;

use super::SERVICE;
use super::state::InventoryState;
use super::types::{ReduceRequest, ReduceResponse, RejectionResponse};

/// List stock endpoint
///
/// GET /inventory
#[utoipa::path(
    get,
    path = "/inventory",
    responses(
        (status = 200, description = "Full item -> quantity ledger", content_type = "application/json")
    ),
    tag = "Inventory"
)]
pub async fn list_stock(State(state): State<Arc<InventoryState>>) -> Json<BTreeMap<String, u64>> {
    tracing::info!("GET /inventory - returning all stock");
    Json(state.ledger.snapshot())
}

/// Reserve (reduce) stock endpoint
///
/// POST /inventory/reduce
#[utoipa::path(
    post,
    path = "/inventory/reduce",
    request_body(content = String, description = "Reservation JSON: {item, quantity}", content_type = "application/json"),
    responses(
        (status = 200, description = "Stock reserved", content_type = "application/json"),
        (status = 400, description = "Item not found, insufficient stock, or malformed quantity")
    ),
    tag = "Inventory"
)]
pub async fn reduce_stock(
    State(state): State<Arc<InventoryState>>,
    payload: Result<Json<ReduceRequest>, JsonRejection>,
) -> Response {
    // A malformed body (negative, non-numeric or missing quantity) never
    // reaches the ledger.
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!("Rejected reduce request: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(RejectionResponse::new(rejection.body_text())),
            )
                .into_response();
        }
    };

    let quantity = req.quantity.get();
    tracing::info!(
        "POST /inventory/reduce - request to reduce {} by {}",
        req.item,
        quantity
    );

    match state.ledger.reserve(&req.item, quantity) {
        Ok(new_stock) => {
            StockMetrics::set_stock_level(SERVICE, &req.item, new_stock);
            StockMetrics::record_reservation(SERVICE, quantity);
            tracing::info!("Success. New stock for {}: {}", req.item, new_stock);
            (
                StatusCode::OK,
                Json(ReduceResponse {
                    success: true,
                    item: req.item,
                    new_stock,
                }),
            )
                .into_response()
        }
        Err(err) => {
            match &err {
                StockError::ItemNotFound => {
                    tracing::warn!("Item not found: {}", req.item);
                }
                StockError::InsufficientStock {
                    available,
                    requested,
                } => {
                    tracing::warn!(
                        "Insufficient stock for {}. Have: {}, Need: {}",
                        req.item,
                        available,
                        requested
                    );
                }
            }
            (
                StatusCode::BAD_REQUEST,
                Json(RejectionResponse::new(err.to_string())),
            )
                .into_response()
        }
    }
}
