// src/routes/health.rs
//! Health check endpoint.
//!
//! Used by container orchestrators and CI to verify the service responds.
//! Also reports whether the measurement store is reachable, so a running
//! service with a lost database is visible without hitting the dashboard.

use axum::{extract::State, routing::get, Json, Router};
use codemetal_agrimetrics::MeasurementStore;
use serde::Serialize;

use crate::Config;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    store: &'static str,
}

/// Handle `GET /health`.
async fn health<S>(State((store, _)): State<(S, Config)>) -> Json<HealthResponse>
where
    S: MeasurementStore + Clone + 'static,
{
    // ---
    let store = if store.check_connection().await {
        "connected"
    } else {
        "unavailable"
    };
    Json(HealthResponse { status: "ok", store })
}

/// Subrouter containing the `/health` route.
pub fn router<S>() -> Router<(S, Config)>
where
    S: MeasurementStore + Clone + 'static,
{
    Router::new().route("/health", get(health::<S>))
}
