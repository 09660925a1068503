//! ordermesh - Order-Fulfillment Coordination
//!
//! Four small HTTP services that together place purchase orders against an
//! in-memory stock ledger:
//!
//! - [`gateway`] - routes external `/api/*` traffic to the owning service
//! - [`order`] - validates orders and reserves stock from the inventory service
//! - [`inventory`] - authoritative stock ledger and the reserve operation
//! - [`user`] - read-only user directory
//!
//! Shared infrastructure:
//!
//! - [`stock`] - `StockLedger`, the atomic per-item check-then-decrement map
//! - [`metrics`] - process-wide Prometheus recorder and domain instruments
//! - [`middleware`] - request counter/histogram/summary wrapping every route
//! - [`config`] - environment-driven service configuration
//! - [`logging`] - tracing subscriber setup (rolling file + stdout)

pub mod config;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod stock;

// Services
pub mod gateway;
pub mod inventory;
pub mod order;
pub mod user;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use stock::{StockError, StockLedger};
