//! User service - read-only account data.
//!
//! Serves a fixed in-memory user list; no mutation surface exists, so the
//! `users_total` gauge only moves at process start.

use std::sync::Arc;

use anyhow::Context;
use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::metrics::UserMetrics;
use crate::middleware;

pub const SERVICE: &str = "user-service";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u32,
    pub name: String,
}

/// User service shared state.
pub struct UserState {
    users: Vec<UserRecord>,
}

impl UserState {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    pub fn seeded() -> Self {
        Self::new(vec![
            UserRecord {
                id: 1,
                name: "Alice".to_string(),
            },
            UserRecord {
                id: 2,
                name: "Bob".to_string(),
            },
        ])
    }
}

/// List users endpoint
///
/// GET /users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All user records", content_type = "application/json")
    ),
    tag = "Users"
)]
pub async fn list_users(State(state): State<Arc<UserState>>) -> Json<Vec<UserRecord>> {
    tracing::info!("GET /users - returning all users");
    Json(state.users.clone())
}

/// Build the user router and set the users gauge.
pub fn router(state: Arc<UserState>) -> Router {
    UserMetrics::set_users_total(SERVICE, state.users.len());

    let routes = Router::new()
        .route("/users", get(list_users))
        .with_state(state);

    middleware::instrument(routes, SERVICE)
}

/// Bind and serve the user service.
pub async fn serve(port: u16, state: Arc<UserState>) -> anyhow::Result<()> {
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
