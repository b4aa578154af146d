use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Result};
use chrono::Utc;

use super::MeasurementStore;
use crate::models::{MeasurementRecord, NewMeasurement};
use crate::window::TimeSeries;

// ---

/// In-process store. Readers always see whole records: a snapshot is cloned
/// under the read lock, appends happen under the write lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    series: Arc<RwLock<TimeSeries>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<MeasurementRecord>) -> Self {
        Self {
            series: Arc::new(RwLock::new(TimeSeries::from_records(records))),
        }
    }

    fn insert(&self, records: impl IntoIterator<Item = MeasurementRecord>) -> Result<usize> {
        // ---
        let mut series = self
            .series
            .write()
            .map_err(|_| anyhow!("measurement store lock poisoned"))?;
        let mut count = 0;
        for record in records {
            series.push(record);
            count += 1;
        }
        Ok(count)
    }
}

impl MeasurementStore for MemoryStore {
    async fn load_all(&self) -> Result<TimeSeries> {
        // ---
        let series = self
            .series
            .read()
            .map_err(|_| anyhow!("measurement store lock poisoned"))?;
        Ok(series.clone())
    }

    async fn append(&self, measurement: NewMeasurement) -> bool {
        // ---
        match self.insert([measurement.into_record(Utc::now())]) {
            Ok(_) => {
                tracing::info!("Added new metrics record");
                true
            }
            Err(e) => {
                tracing::error!("Error adding new metrics record: {}", e);
                false
            }
        }
    }

    async fn append_batch(&self, records: Vec<MeasurementRecord>) -> Result<usize> {
        self.insert(records)
    }

    async fn check_connection(&self) -> bool {
        !self.series.is_poisoned()
    }
}
