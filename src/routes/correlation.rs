//! Correlation between two metrics over one window.

use axum::{
    extract::Query, extract::State, http::StatusCode, response::IntoResponse, response::Response,
    routing::get, Json, Router,
};
use chrono::Utc;
use codemetal_agrimetrics::analytics::correlation;
use codemetal_agrimetrics::{MeasurementStore, Metric};
use serde::Deserialize;
use tracing::{debug, error, info};

use super::{analytics_error_response, error_response, WindowQuery};
use crate::Config;

// ---

/// The two metrics to compare, by snake_case name.
#[derive(Debug, Deserialize)]
pub struct MetricPair {
    x: Metric,
    y: Metric,
}

pub fn router<S>() -> Router<(S, Config)>
where
    S: MeasurementStore + Clone + 'static,
{
    // ---
    Router::new().route("/correlation", get(handler::<S>))
}

async fn handler<S>(
    Query(pair): Query<MetricPair>,
    Query(params): Query<WindowQuery>,
    State((store, _config)): State<(S, Config)>,
) -> Response
where
    S: MeasurementStore + Clone + 'static,
{
    // ---
    info!("GET /correlation - {:?} {:?}", pair, params);

    if pair.x == pair.y {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "x and y must name different metrics",
        );
    }

    let series = match store.load_all().await {
        Ok(series) => series,
        Err(e) => {
            error!("Failed to load measurements: {:#}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load data");
        }
    };

    let (start, end) = params.dates(Utc::now().date_naive());
    debug!("GET /correlation - window {} to {}", start, end);

    let result = series
        .window(start, end)
        .and_then(|window| correlation(&window, pair.x, pair.y));

    match result {
        Ok(c) => {
            info!(
                "{} vs {}: r = {:.3} ({:?})",
                c.x.name(),
                c.y.name(),
                c.coefficient,
                c.strength
            );
            (StatusCode::OK, Json(c)).into_response()
        }
        Err(e) => {
            error!("Correlation failed: {}", e);
            analytics_error_response(e)
        }
    }
}
