//! Prometheus metrics for the order-fulfillment flow.
//!
//! One recorder is installed per process and shared by every component:
//! the HTTP middleware records the request counter plus duration
//! histogram/summary, and each service owns its domain instruments
//! (the inventory service the stock gauge, the order service the order
//! counters, the user service the user gauge).
//!
//! Scraping via [`render`] never mutates recorder state and is safe to
//! call concurrently with in-flight request instrumentation.

use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::time::Duration;
use thiserror::Error;

use metrics::{counter, gauge, histogram};

/// Fixed latency buckets (seconds) for `http_request_duration_seconds`.
pub const DURATION_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

/// Quantiles rendered for `http_request_summary_seconds`.
pub const SUMMARY_QUANTILES: &[f64] = &[0.5, 0.9, 0.99];

/// Errors from recorder installation.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build the Prometheus exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install the recorder as the process-wide default
    #[error("Failed to install metrics recorder: {0}")]
    Install(String),
}

static RECORDER: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the process-wide Prometheus recorder.
///
/// Idempotent: the first call installs, later calls return the same handle.
/// The duration histogram gets its fixed buckets pinned by full name; every
/// other duration metric (the summary) renders as a quantile summary.
///
/// # Errors
///
/// Returns [`MetricsError`] if the exporter cannot be built or a different
/// recorder is already installed in this process.
pub fn install() -> Result<&'static PrometheusHandle, MetricsError> {
    RECORDER.get_or_try_init(|| {
        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full("http_request_duration_seconds".to_string()),
                DURATION_BUCKETS,
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?
            .set_quantiles(SUMMARY_QUANTILES)
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        let handle = builder
            .install_recorder()
            .map_err(|e| MetricsError::Install(e.to_string()))?;

        describe_instruments();
        Ok(handle)
    })
}

/// Render the current state in the Prometheus text exposition format.
///
/// Returns `None` if no recorder has been installed.
pub fn render() -> Option<String> {
    RECORDER.get().map(PrometheusHandle::render)
}

fn describe_instruments() {
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "Duration of HTTP requests in seconds"
    );
    describe_histogram!(
        "http_request_summary_seconds",
        "Duration of HTTP requests in seconds (summary)"
    );
    describe_gauge!(
        "inventory_stock_level_total",
        "Current stock level of each item"
    );
    describe_counter!(
        "inventory_units_reserved_total",
        "Cumulative units moved by successful reservations"
    );
    describe_counter!("orders_total", "Total number of orders processed");
    describe_counter!(
        "orders_value_total",
        "Total units across successful orders"
    );
    describe_gauge!("users_total", "Total number of users in the system");
}

/// Request-level instruments, recorded once per completed response.
pub struct HttpMetrics;

impl HttpMetrics {
    pub fn record_request(
        service: &'static str,
        method: String,
        route: String,
        status_code: u16,
        elapsed: Duration,
    ) {
        let labels = [
            ("service", service.to_string()),
            ("method", method),
            ("route", route),
            ("status_code", status_code.to_string()),
        ];
        counter!("http_requests_total", &labels).increment(1);
        histogram!("http_request_duration_seconds", &labels).record(elapsed.as_secs_f64());
        histogram!("http_request_summary_seconds", &labels).record(elapsed.as_secs_f64());
    }
}

/// Stock instruments, owned by the inventory service.
pub struct StockMetrics;

impl StockMetrics {
    /// Point the stock gauge for one item at its current level.
    pub fn set_stock_level(service: &'static str, item: &str, level: u64) {
        gauge!(
            "inventory_stock_level_total",
            "service" => service,
            "item" => item.to_string()
        )
        .set(level as f64);
    }

    /// Record the units moved by a successful reservation.
    pub fn record_reservation(service: &'static str, units: u64) {
        counter!("inventory_units_reserved_total", "service" => service).increment(units);
    }

    /// Initialize the reservation counter so the first scrape carries a sample.
    pub fn init(service: &'static str) {
        counter!("inventory_units_reserved_total", "service" => service).absolute(0);
    }
}

/// Order-outcome instruments, owned by the order service.
pub struct OrderMetrics;

/// Outcome labels for `orders_total`.
pub const ORDER_STATUSES: [&str; 3] = ["success", "failed_stock", "error"];

impl OrderMetrics {
    /// Count one processed order under its outcome label.
    pub fn record_outcome(service: &'static str, status: &'static str) {
        counter!("orders_total", "service" => service, "status" => status).increment(1);
    }

    /// Accumulate the units of a successfully placed order.
    pub fn record_units(service: &'static str, units: u64) {
        counter!("orders_value_total", "service" => service).increment(units);
    }

    /// Zero every outcome label so the first scrape carries samples.
    pub fn init(service: &'static str) {
        for status in ORDER_STATUSES {
            counter!("orders_total", "service" => service, "status" => status).absolute(0);
        }
        counter!("orders_value_total", "service" => service).absolute(0);
    }
}

/// User-count gauge, owned by the user service.
pub struct UserMetrics;

impl UserMetrics {
    pub fn set_users_total(service: &'static str, count: usize) {
        gauge!("users_total", "service" => service).set(count as f64);
    }
}
