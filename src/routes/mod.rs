//! Routes gateway. Each sibling module exports a subrouter; this is the only
//! routing module `main.rs` knows about.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json, Router};
use chrono::NaiveDate;
use codemetal_agrimetrics::{resolve_dates, AnalyticsError, DateRange, MeasurementStore};
use serde::Deserialize;
use serde_json::json;

use crate::Config;

mod correlation;
mod dashboard;
mod health;
mod measurements;
mod regions;

// ---

pub fn router<S>(store: S, config: Config) -> Router
where
    S: MeasurementStore + Clone + 'static,
{
    // ---
    Router::new()
        .merge(correlation::router())
        .merge(dashboard::router())
        .merge(measurements::router())
        .merge(regions::router())
        .merge(health::router())
        .with_state((store, config))
}

/// Date selection shared by the window-based endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    /// First day, `YYYY-MM-DD`.
    start: Option<NaiveDate>,
    /// Last day (inclusive), `YYYY-MM-DD`.
    end: Option<NaiveDate>,
    /// Preset such as `last_7_days`; takes precedence over `start`/`end`.
    range: Option<DateRange>,
    /// Region for the eco-impact comparison.
    region: Option<String>,
}

impl WindowQuery {
    fn dates(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        resolve_dates(self.start, self.end, self.range, today)
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    // ---
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn analytics_error_response(err: AnalyticsError) -> Response {
    // ---
    let status = match err {
        AnalyticsError::EmptyWindow => StatusCode::NOT_FOUND,
        AnalyticsError::UnknownRegion(_) => StatusCode::BAD_REQUEST,
        AnalyticsError::DivisionByZero { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };
    error_response(status, err.to_string())
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_query_preset_wins() {
        // ---
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let query = WindowQuery {
            start: NaiveDate::from_ymd_opt(2025, 1, 1),
            end: NaiveDate::from_ymd_opt(2025, 2, 1),
            range: Some(DateRange::Last7Days),
            region: None,
        };
        assert_eq!(query.dates(today), DateRange::Last7Days.resolve(today));
        assert_eq!(
            WindowQuery::default().dates(today),
            DateRange::Last30Days.resolve(today)
        );
    }

    #[test]
    fn test_error_status_mapping() {
        // ---
        assert_eq!(
            analytics_error_response(AnalyticsError::EmptyWindow).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            analytics_error_response(AnalyticsError::UnknownRegion("Atlantis".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            analytics_error_response(AnalyticsError::DivisionByZero { quantity: "x" }).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
