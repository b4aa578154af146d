//! Measurement entry and listing.

use axum::{
    extract::Query, extract::State, http::StatusCode, response::IntoResponse, response::Response,
    routing::get, Json, Router,
};
use chrono::Utc;
use codemetal_agrimetrics::{AnalyticsError, MeasurementStore, NewMeasurement};
use serde_json::json;
use tracing::{error, info, warn};

use super::{analytics_error_response, error_response, WindowQuery};
use crate::Config;

// ---

pub fn router<S>() -> Router<(S, Config)>
where
    S: MeasurementStore + Clone + 'static,
{
    // ---
    Router::new().route("/measurements", get(list::<S>).post(create::<S>))
}

/// `POST /measurements` - validate and store one measurement.
async fn create<S>(
    State((store, _)): State<(S, Config)>,
    Json(measurement): Json<NewMeasurement>,
) -> Response
where
    S: MeasurementStore + Clone + 'static,
{
    // ---
    info!("POST /measurements");

    if let Err(e) = measurement.validate() {
        warn!("Rejected measurement: {}", e);
        return error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
    }

    if store.append(measurement).await {
        (StatusCode::CREATED, Json(json!({ "status": "created" }))).into_response()
    } else {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to add measurements",
        )
    }
}

/// `GET /measurements` - records of the selected window, oldest first.
async fn list<S>(
    Query(params): Query<WindowQuery>,
    State((store, _)): State<(S, Config)>,
) -> Response
where
    S: MeasurementStore + Clone + 'static,
{
    // ---
    info!("GET /measurements - {:?}", params);

    let series = match store.load_all().await {
        Ok(series) => series,
        Err(e) => {
            error!("Failed to load measurements: {:#}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load data");
        }
    };

    let (start, end) = params.dates(Utc::now().date_naive());
    match series.window(start, end) {
        Ok(window) => (StatusCode::OK, Json(window.records())).into_response(),
        Err(AnalyticsError::EmptyWindow) => (StatusCode::OK, Json(json!([]))).into_response(),
        Err(e) => analytics_error_response(e),
    }
}
