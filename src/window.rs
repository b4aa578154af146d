//! Ordered measurement series and the date-range window filter.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};
use crate::models::{MeasurementRecord, Metric};

// ---

/// Measurement records ordered by timestamp (non-decreasing).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    records: Vec<MeasurementRecord>,
}

impl TimeSeries {
    /// Build a series from records in any order. The sort is stable, so
    /// records sharing a timestamp keep their insertion order.
    pub fn from_records(mut records: Vec<MeasurementRecord>) -> Self {
        // ---
        records.sort_by_key(|r| r.timestamp);
        Self { records }
    }

    pub fn push(&mut self, record: MeasurementRecord) {
        // ---
        let at = self
            .records
            .partition_point(|r| r.timestamp <= record.timestamp);
        self.records.insert(at, record);
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records from `start` 00:00 UTC through the whole of `end`.
    ///
    /// Returns [`AnalyticsError::EmptyWindow`] when nothing falls in range.
    pub fn window(&self, start: NaiveDate, end: NaiveDate) -> Result<Window<'_>> {
        // ---
        let from = day_start(start);
        let until = end.checked_add_days(Days::new(1)).map(day_start);

        let lo = self.records.partition_point(|r| r.timestamp < from);
        let hi = match until {
            Some(until) => self.records.partition_point(|r| r.timestamp < until),
            None => self.records.len(),
        };

        tracing::debug!(%start, %end, selected = hi.saturating_sub(lo), "window filter");

        if lo >= hi {
            return Err(AnalyticsError::EmptyWindow);
        }
        Window::new(&self.records[lo..hi])
    }

    /// Every stored record as one window.
    pub fn full_window(&self) -> Result<Window<'_>> {
        Window::new(&self.records)
    }
}

impl From<Vec<MeasurementRecord>> for TimeSeries {
    fn from(records: Vec<MeasurementRecord>) -> Self {
        Self::from_records(records)
    }
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

// ---

/// A borrowed, non-empty, timestamp-ordered run of records.
///
/// Every engine takes a `&Window`, so the emptiness check happens exactly
/// once, when the window is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window<'a> {
    records: &'a [MeasurementRecord],
}

impl<'a> Window<'a> {
    /// Wrap an already ordered slice.
    pub fn new(records: &'a [MeasurementRecord]) -> Result<Self> {
        // ---
        if records.is_empty() {
            return Err(AnalyticsError::EmptyWindow);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &'a [MeasurementRecord] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn first(&self) -> &'a MeasurementRecord {
        &self.records[0]
    }

    pub fn last(&self) -> &'a MeasurementRecord {
        &self.records[self.records.len() - 1]
    }

    pub fn values(&self, metric: Metric) -> impl Iterator<Item = f64> + 'a {
        self.records.iter().map(move |r| metric.value(r))
    }

    pub fn sum(&self, metric: Metric) -> f64 {
        self.values(metric).sum()
    }

    pub fn mean(&self, metric: Metric) -> f64 {
        self.sum(metric) / self.len() as f64
    }

    /// Sample standard deviation (n - 1). A single record has no spread,
    /// so it yields 0.
    pub fn std_dev(&self, metric: Metric) -> f64 {
        // ---
        let n = self.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean(metric);
        let sq: f64 = self.values(metric).map(|v| (v - mean).powi(2)).sum();
        (sq / (n - 1) as f64).sqrt()
    }
}

// ---

/// Quick-filter presets offered next to the explicit date pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[serde(rename = "last_7_days")]
    Last7Days,
    #[default]
    #[serde(rename = "last_30_days")]
    Last30Days,
    #[serde(rename = "last_3_months")]
    Last3Months,
    AllTime,
}

impl DateRange {
    fn days(self) -> u64 {
        // ---
        match self {
            DateRange::Last7Days => 7,
            DateRange::Last30Days => 30,
            DateRange::Last3Months => 90,
            // "All time" looks back one year.
            DateRange::AllTime => 365,
        }
    }

    /// Inclusive `(start, end)` dates ending on `today`.
    pub fn resolve(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        // ---
        let start = today
            .checked_sub_days(Days::new(self.days()))
            .unwrap_or(NaiveDate::MIN);
        (start, today)
    }
}

/// Pick the dates to analyse. A preset wins over explicit dates; an inverted
/// explicit pair falls back to the default preset.
pub fn resolve_dates(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    preset: Option<DateRange>,
    today: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    // ---
    if let Some(preset) = preset {
        return preset.resolve(today);
    }

    let (default_start, default_end) = DateRange::default().resolve(today);
    let start = start.unwrap_or(default_start);
    let end = end.unwrap_or(default_end);

    if start > end {
        tracing::warn!(%start, %end, "end date must be after start date, using default range");
        return (default_start, default_end);
    }
    (start, end)
}
