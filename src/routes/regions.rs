//! Region catalog endpoints.

use axum::{extract::Path, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use codemetal_agrimetrics::analytics::{find_region, list_region_names};
use codemetal_agrimetrics::MeasurementStore;
use tracing::debug;

use super::analytics_error_response;
use crate::Config;

// ---

pub fn router<S>() -> Router<(S, Config)>
where
    S: MeasurementStore + Clone + 'static,
{
    // ---
    Router::new()
        .route("/regions", get(list))
        .route("/regions/{name}", get(profile))
}

/// `GET /regions` - catalog names in catalog order.
async fn list() -> Json<Vec<&'static str>> {
    Json(list_region_names())
}

/// `GET /regions/{name}` - one profile, exact name match.
async fn profile(Path(name): Path<String>) -> impl IntoResponse {
    // ---
    debug!("GET /regions/{}", name);
    match find_region(&name) {
        Ok(region) => (StatusCode::OK, Json(*region)).into_response(),
        Err(e) => analytics_error_response(e),
    }
}
