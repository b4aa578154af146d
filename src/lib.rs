//! Analytics core for the `codemetal-agrimetrics` service.
//!
//! Measurements from an agricultural site flow through a date-range
//! [`Window`] into a set of pure engines:
//! - [`analytics::statistics`]: current vs average values, status bands and
//!   metric correlation
//! - [`analytics::efficiency`]: water and energy efficiency against baselines
//! - [`analytics::recommendations`]: the ordered recommendation rule table
//! - [`analytics::savings`]: projected savings and environmental impact
//! - [`analytics::regional`]: comparison with regional profiles and the
//!   eco-impact score
//!
//! [`DashboardReport`] runs all of them in one call. Storage sits behind the
//! [`MeasurementStore`] trait.

pub mod analytics;
pub mod error;
pub mod models;
pub mod report;
pub mod sample;
pub mod store;
pub mod window;

pub use error::AnalyticsError;
pub use models::{MeasurementRecord, Metric, NewMeasurement, ValidationError};
pub use report::DashboardReport;
pub use store::{MeasurementStore, MemoryStore, PgMeasurementStore};
pub use window::{resolve_dates, DateRange, TimeSeries, Window};
