//! Order wire types.

use serde::{Deserialize, Serialize};

use crate::inventory::types::Quantity;

/// Order placement request. Fields are optional so presence is checked in
/// the handler, before any network call.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub quantity: Option<Quantity>,
}

/// Successful placement reply.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlacedResponse {
    pub success: bool,
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub message: String,
}

/// Stock-rejection reply, echoing the upstream reason.
#[derive(Debug, Serialize, Deserialize)]
pub struct StockRejectionResponse {
    pub success: bool,
    pub message: String,
}

/// Generic error wrapper for invalid input and upstream failures.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

impl ErrorReply {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
