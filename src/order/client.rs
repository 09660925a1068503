//! HTTP client for the inventory service's reserve operation.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::inventory::types::{Quantity, ReduceRequest};

/// What the reserve call resolved to, as far as the coordinator can tell.
#[derive(Debug)]
pub enum ReserveOutcome {
    /// Inventory decremented; the new level is echoed back.
    Reserved { new_stock: u64 },
    /// Business-rule rejection (unknown item or insufficient stock).
    Rejected { message: String },
}

#[derive(Debug, Error)]
pub enum InventoryCallError {
    /// Transport failure: timeout, connection refused, request build error.
    #[error("inventory request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The response could not be interpreted either way.
    #[error("unreadable inventory response (status {status})")]
    UnreadableResponse { status: u16 },
}

/// Loose reply shape covering both the success and rejection bodies.
#[derive(Debug, Deserialize)]
struct ReserveReply {
    success: bool,
    message: Option<String>,
    #[serde(rename = "newStock")]
    new_stock: Option<u64>,
}

/// Client for the inventory service, with a bounded request timeout.
///
/// The reserve call is the coordinator's only suspension point; the timeout
/// bounds it. There are no retries: on a transport failure the caller cannot
/// know whether the decrement applied downstream.
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl InventoryClient {
    /// # Errors
    ///
    /// Returns the underlying builder error if the TLS/connection pool
    /// cannot be initialized.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Call `POST {base}/inventory/reduce`.
    ///
    /// # Errors
    ///
    /// [`InventoryCallError::Transport`] on timeout or connection failure,
    /// [`InventoryCallError::UnreadableResponse`] when the body of a non-2xx
    /// reply carries no parseable rejection.
    pub async fn reserve(
        &self,
        item: &str,
        quantity: u64,
    ) -> Result<ReserveOutcome, InventoryCallError> {
        let body = ReduceRequest {
            item: item.to_string(),
            quantity: Quantity::from(quantity),
        };

        let response = self
            .http
            .post(format!("{}/inventory/reduce", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let reply: ReserveReply = response
            .json()
            .await
            .map_err(|_| InventoryCallError::UnreadableResponse {
                status: status.as_u16(),
            })?;

        if status.is_success() && reply.success {
            let new_stock =
                reply
                    .new_stock
                    .ok_or(InventoryCallError::UnreadableResponse {
                        status: status.as_u16(),
                    })?;
            Ok(ReserveOutcome::Reserved { new_stock })
        } else {
            Ok(ReserveOutcome::Rejected {
                message: reply
                    .message
                    .unwrap_or_else(|| "Insufficient stock".to_string()),
            })
        }
    }
}
