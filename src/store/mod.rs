//! Measurement store contract and its implementations.
//!
//! The analytics core only ever reads a [`TimeSeries`] snapshot from a store
//! and hands new measurements to it; it never holds a store across calls.

use std::future::Future;

use anyhow::Result;

use crate::models::{MeasurementRecord, NewMeasurement};
use crate::window::TimeSeries;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgMeasurementStore;

// ---

pub trait MeasurementStore: Send + Sync {
    /// All records, ordered by timestamp. An empty store yields an empty
    /// series, not an error.
    fn load_all(&self) -> impl Future<Output = Result<TimeSeries>> + Send;

    /// Persist one measurement stamped with the current time. Returns `false`
    /// (after logging the cause) when it could not be stored. Field ranges
    /// are not checked here.
    fn append(&self, measurement: NewMeasurement) -> impl Future<Output = bool> + Send;

    /// Persist several already-timestamped records, e.g. a placeholder series.
    fn append_batch(
        &self,
        records: Vec<MeasurementRecord>,
    ) -> impl Future<Output = Result<usize>> + Send;

    /// Whether the backing storage is reachable.
    fn check_connection(&self) -> impl Future<Output = bool> + Send;
}
