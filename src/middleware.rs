//! Shared HTTP instrumentation applied to every service's router.
//!
//! Wrapping starts a duration timer when the request enters and records the
//! request counter plus histogram/summary exactly once per completed
//! response, success and error paths alike. The route label uses the
//! matched (templated) path when the router resolved one, falling back to
//! the raw path only for unmatched routes, which keeps label cardinality
//! bounded.

use std::time::Instant;

use axum::{
    Router,
    extract::{MatchedPath, Request, State},
    http::{StatusCode, header},
    middleware::{Next, from_fn_with_state},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;

use crate::metrics::HttpMetrics;

/// Wrap a service router with the shared instrumentation and the common
/// `/healthz` and `/metrics` endpoints.
pub fn instrument(router: Router, service: &'static str) -> Router {
    router
        .route("/healthz", get(healthz))
        .route("/metrics", get(serve_metrics))
        .layer(from_fn_with_state(service, track_http))
        .layer(CorsLayer::permissive())
}

/// Per-request instrumentation middleware.
async fn track_http(State(service): State<&'static str>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let started = Instant::now();
    let response = next.run(request).await;

    HttpMetrics::record_request(
        service,
        method,
        route,
        response.status().as_u16(),
        started.elapsed(),
    );

    response
}

async fn healthz() -> &'static str {
    "OK"
}

/// Render the process-wide registry in the text exposition format.
async fn serve_metrics() -> Response {
    match crate::metrics::render() {
        Some(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "metrics recorder unavailable",
        )
            .into_response(),
    }
}
