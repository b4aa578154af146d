//! The dashboard endpoint: the whole analytics pipeline for one window.

use axum::{
    extract::Query, extract::State, http::StatusCode, response::IntoResponse, response::Response,
    routing::get, Json, Router,
};
use chrono::Utc;
use codemetal_agrimetrics::{DashboardReport, MeasurementStore};
use tracing::{debug, error, info};

use super::{analytics_error_response, error_response, WindowQuery};
use crate::Config;

// ---

pub fn router<S>() -> Router<(S, Config)>
where
    S: MeasurementStore + Clone + 'static,
{
    // ---
    Router::new().route("/dashboard", get(handler::<S>))
}

async fn handler<S>(
    Query(params): Query<WindowQuery>,
    State((store, config)): State<(S, Config)>,
) -> Response
where
    S: MeasurementStore + Clone + 'static,
{
    // ---
    info!("GET /dashboard - {:?}", params);

    // Step 1: Snapshot the store
    let series = match store.load_all().await {
        Ok(series) => series,
        Err(e) => {
            error!("Failed to load measurements: {:#}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load data");
        }
    };

    // Step 2: Select the window
    let (start, end) = params.dates(Utc::now().date_naive());
    let region = params.region.as_deref().unwrap_or(&config.default_region);
    debug!("GET /dashboard - window {} to {}, region {}", start, end, region);

    // Step 3: Run the pipeline
    let report = series
        .window(start, end)
        .and_then(|window| DashboardReport::build(&window, region));

    match report {
        Ok(report) => {
            info!(
                "Dashboard complete, {} records analysed",
                report.window.record_count
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            error!("Dashboard failed: {}", e);
            analytics_error_response(e)
        }
    }
}
