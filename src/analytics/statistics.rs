//! Current-vs-average statistics and fixed-band status classification.

use serde::Serialize;

use crate::error::{AnalyticsError, Result};
use crate::models::{MeasurementRecord, Metric};
use crate::window::Window;

// ---

/// Condition of a metric relative to its growing bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Optimal,
    Warning,
    Critical,
}

/// Classification bands for one metric.
///
/// `Optimal` is `[optimal_low, optimal_high]`, `Warning` is
/// `[warning_low, optimal_low) ∪ (optimal_high, warning_high]`, anything
/// else (NaN included) is `Critical`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusBands {
    pub warning_low: f64,
    pub optimal_low: f64,
    pub optimal_high: f64,
    pub warning_high: f64,
}

impl StatusBands {
    pub fn classify(&self, value: f64) -> Status {
        // ---
        if (self.optimal_low..=self.optimal_high).contains(&value) {
            Status::Optimal
        } else if (self.warning_low..self.optimal_low).contains(&value)
            || (value > self.optimal_high && value <= self.warning_high)
        {
            Status::Warning
        } else {
            Status::Critical
        }
    }
}

pub const TEMPERATURE_BANDS: StatusBands = StatusBands {
    warning_low: 15.0,
    optimal_low: 18.0,
    optimal_high: 24.0,
    warning_high: 28.0,
};

pub const HUMIDITY_BANDS: StatusBands = StatusBands {
    warning_low: 40.0,
    optimal_low: 50.0,
    optimal_high: 70.0,
    warning_high: 80.0,
};

pub const SOIL_MOISTURE_BANDS: StatusBands = StatusBands {
    warning_low: 40.0,
    optimal_low: 60.0,
    optimal_high: 80.0,
    warning_high: 90.0,
};

/// Number of trailing records the short-term trend looks at.
pub const TREND_SPAN: usize = 7;

/// Current value, window average and the derived figures for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub current: f64,
    pub average: f64,
    /// `current - average`.
    pub change: f64,
    pub status: Status,
    /// Last minus first value of the trailing seven records, 0 if the window
    /// is shorter than that.
    pub trend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSnapshot {
    pub temperature: MetricSummary,
    pub humidity: MetricSummary,
    pub soil_moisture: MetricSummary,
    pub avg_water_usage: f64,
    pub avg_energy_consumption: f64,
    pub record_count: usize,
}

/// Compute the snapshot for a window. Pure; calling it twice on the same
/// window yields the same snapshot.
pub fn calculate_statistics(window: &Window<'_>) -> StatisticsSnapshot {
    // ---
    let latest = window.last();
    let trailing = trailing_span(window);

    let summarize = |metric: Metric, bands: &StatusBands| {
        let current = metric.value(latest);
        let average = window.mean(metric);
        MetricSummary {
            current,
            average,
            change: current - average,
            status: bands.classify(current),
            trend: trailing.map_or(0.0, |(first, last)| {
                metric.value(last) - metric.value(first)
            }),
        }
    };

    StatisticsSnapshot {
        temperature: summarize(Metric::Temperature, &TEMPERATURE_BANDS),
        humidity: summarize(Metric::Humidity, &HUMIDITY_BANDS),
        soil_moisture: summarize(Metric::SoilMoisture, &SOIL_MOISTURE_BANDS),
        avg_water_usage: window.mean(Metric::WaterUsage),
        avg_energy_consumption: window.mean(Metric::EnergyConsumption),
        record_count: window.len(),
    }
}

/// First and last record of the trailing trend span, when there are enough.
fn trailing_span<'a>(
    window: &Window<'a>,
) -> Option<(&'a MeasurementRecord, &'a MeasurementRecord)> {
    // ---
    let records = window.records();
    if records.len() < TREND_SPAN {
        return None;
    }
    let span = &records[records.len() - TREND_SPAN..];
    Some((&span[0], &span[TREND_SPAN - 1]))
}

// ---

/// |r| above this is a strong correlation.
pub const STRONG_CORRELATION: f64 = 0.7;
/// |r| above this (and not strong) is a moderate correlation.
pub const MODERATE_CORRELATION: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
}

impl CorrelationStrength {
    pub fn from_coefficient(coefficient: f64) -> Self {
        // ---
        let magnitude = coefficient.abs();
        if magnitude > STRONG_CORRELATION {
            CorrelationStrength::Strong
        } else if magnitude > MODERATE_CORRELATION {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Weak
        }
    }
}

/// Pearson correlation between two metrics over one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correlation {
    pub x: Metric,
    pub y: Metric,
    /// In [-1, 1].
    pub coefficient: f64,
    pub strength: CorrelationStrength,
}

/// Pearson coefficient of `x` against `y`.
///
/// Fails with [`AnalyticsError::DivisionByZero`] when either metric has no
/// spread in the window, which includes every single-record window.
pub fn correlation(window: &Window<'_>, x: Metric, y: Metric) -> Result<Correlation> {
    // ---
    let (sx, sy) = (window.std_dev(x), window.std_dev(y));
    if sx == 0.0 || sy == 0.0 {
        return Err(AnalyticsError::DivisionByZero {
            quantity: "correlation coefficient",
        });
    }

    let (mx, my) = (window.mean(x), window.mean(y));
    let covariance: f64 = window
        .records()
        .iter()
        .map(|r| (x.value(r) - mx) * (y.value(r) - my))
        .sum::<f64>()
        / (window.len() - 1) as f64;

    let coefficient = (covariance / (sx * sy)).clamp(-1.0, 1.0);
    Ok(Correlation {
        x,
        y,
        coefficient,
        strength: CorrelationStrength::from_coefficient(coefficient),
    })
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn series(temps: &[f64]) -> Vec<MeasurementRecord> {
        // ---
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        temps
            .iter()
            .enumerate()
            .map(|(i, &t)| MeasurementRecord {
                timestamp: start + Duration::days(i as i64),
                temperature: t,
                humidity: 60.0 + i as f64,
                soil_moisture: 70.0 - i as f64,
                water_usage: 10.0,
                energy_consumption: 5.0,
            })
            .collect()
    }

    #[test]
    fn test_single_record_scenario() {
        // ---
        let records = vec![MeasurementRecord {
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
            temperature: 20.0,
            humidity: 60.0,
            soil_moisture: 70.0,
            water_usage: 10.0,
            energy_consumption: 5.0,
        }];
        let stats = calculate_statistics(&Window::new(&records).unwrap());

        assert_eq!(stats.temperature.current, 20.0);
        assert_eq!(stats.temperature.change, 0.0);
        assert_eq!(stats.temperature.status, Status::Optimal);
        assert_eq!(stats.humidity.status, Status::Optimal);
        assert_eq!(stats.soil_moisture.status, Status::Optimal);
        assert_eq!(stats.temperature.trend, 0.0);
        assert_eq!(stats.avg_water_usage, 10.0);
    }

    #[test]
    fn test_current_is_last_record_and_change_is_vs_mean() {
        // ---
        let records = series(&[10.0, 20.0, 30.0]);
        let stats = calculate_statistics(&Window::new(&records).unwrap());

        assert_eq!(stats.temperature.current, 30.0);
        assert_eq!(stats.temperature.average, 20.0);
        assert_eq!(stats.temperature.change, 10.0);
        assert_eq!(stats.temperature.status, Status::Critical);
        assert_eq!(stats.record_count, 3);
    }

    #[test]
    fn test_trend_needs_seven_records() {
        // ---
        let six = series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let stats = calculate_statistics(&Window::new(&six).unwrap());
        assert_eq!(stats.temperature.trend, 0.0);
        assert_eq!(stats.humidity.trend, 0.0);
        assert_eq!(stats.soil_moisture.trend, 0.0);

        // Trailing seven of nine: indices 2..=8
        let nine = series(&[100.0, 100.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 12.0]);
        let stats = calculate_statistics(&Window::new(&nine).unwrap());
        assert_eq!(stats.temperature.trend, 9.0);
        assert_eq!(stats.humidity.trend, 6.0);
        assert_eq!(stats.soil_moisture.trend, -6.0);
    }

    #[test]
    fn test_statistics_are_idempotent() {
        // ---
        let records = series(&[18.0, 19.5, 21.0, 25.0, 14.0, 22.0, 23.0, 24.5]);
        let window = Window::new(&records).unwrap();
        assert_eq!(calculate_statistics(&window), calculate_statistics(&window));
    }

    #[test]
    fn test_temperature_band_edges() {
        // ---
        let cases = [
            (14.99, Status::Critical),
            (15.0, Status::Warning),
            (17.99, Status::Warning),
            (18.0, Status::Optimal),
            (24.0, Status::Optimal),
            (24.01, Status::Warning),
            (28.0, Status::Warning),
            (28.01, Status::Critical),
        ];
        for (value, expected) in cases {
            assert_eq!(TEMPERATURE_BANDS.classify(value), expected, "temperature {value}");
        }
    }

    #[test]
    fn test_humidity_and_soil_band_edges() {
        // ---
        assert_eq!(HUMIDITY_BANDS.classify(39.9), Status::Critical);
        assert_eq!(HUMIDITY_BANDS.classify(40.0), Status::Warning);
        assert_eq!(HUMIDITY_BANDS.classify(50.0), Status::Optimal);
        assert_eq!(HUMIDITY_BANDS.classify(70.0), Status::Optimal);
        assert_eq!(HUMIDITY_BANDS.classify(80.0), Status::Warning);
        assert_eq!(HUMIDITY_BANDS.classify(80.1), Status::Critical);

        assert_eq!(SOIL_MOISTURE_BANDS.classify(39.0), Status::Critical);
        assert_eq!(SOIL_MOISTURE_BANDS.classify(59.9), Status::Warning);
        assert_eq!(SOIL_MOISTURE_BANDS.classify(60.0), Status::Optimal);
        assert_eq!(SOIL_MOISTURE_BANDS.classify(80.0), Status::Optimal);
        assert_eq!(SOIL_MOISTURE_BANDS.classify(90.0), Status::Warning);
        assert_eq!(SOIL_MOISTURE_BANDS.classify(95.0), Status::Critical);
    }

    #[test]
    fn test_classification_is_total() {
        // ---
        // Sweep the real line in small steps; every value gets exactly one
        // status, and the status only changes at band edges.
        let mut value = -50.0;
        while value < 150.0 {
            let status = TEMPERATURE_BANDS.classify(value);
            let optimal = (18.0..=24.0).contains(&value);
            let warning = (15.0..18.0).contains(&value) || (value > 24.0 && value <= 28.0);
            match status {
                Status::Optimal => assert!(optimal && !warning),
                Status::Warning => assert!(warning && !optimal),
                Status::Critical => assert!(!warning && !optimal),
            }
            value += 0.25;
        }
        assert_eq!(TEMPERATURE_BANDS.classify(f64::NAN), Status::Critical);
        assert_eq!(HUMIDITY_BANDS.classify(f64::INFINITY), Status::Critical);
    }

    fn paired(xs: &[f64], ys: &[f64]) -> Vec<MeasurementRecord> {
        // ---
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        xs.iter()
            .zip(ys)
            .enumerate()
            .map(|(i, (&t, &h))| MeasurementRecord {
                timestamp: start + Duration::days(i as i64),
                temperature: t,
                humidity: h,
                soil_moisture: 70.0,
                water_usage: 10.0,
                energy_consumption: 5.0,
            })
            .collect()
    }

    #[test]
    fn test_correlation_coefficient() {
        // ---
        let records = paired(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]);
        let window = Window::new(&records).unwrap();
        let c = correlation(&window, Metric::Temperature, Metric::Humidity).unwrap();
        assert!((c.coefficient - 1.0).abs() < 1e-12);
        assert_eq!(c.strength, CorrelationStrength::Strong);

        let records = paired(&[1.0, 2.0, 3.0, 4.0], &[8.0, 6.0, 4.0, 2.0]);
        let window = Window::new(&records).unwrap();
        let c = correlation(&window, Metric::Temperature, Metric::Humidity).unwrap();
        assert!((c.coefficient + 1.0).abs() < 1e-12);
        assert_eq!(c.strength, CorrelationStrength::Strong);

        // x = [1, 2, 3], y = [1, 3, 2]: r = 1 / 2
        let records = paired(&[1.0, 2.0, 3.0], &[1.0, 3.0, 2.0]);
        let window = Window::new(&records).unwrap();
        let c = correlation(&window, Metric::Temperature, Metric::Humidity).unwrap();
        assert!((c.coefficient - 0.5).abs() < 1e-12);
        assert_eq!(c.strength, CorrelationStrength::Moderate);
        assert_eq!(c.x, Metric::Temperature);
        assert_eq!(c.y, Metric::Humidity);
    }

    #[test]
    fn test_correlation_needs_spread() {
        // ---
        let records = paired(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]);
        let window = Window::new(&records).unwrap();
        assert!(matches!(
            correlation(&window, Metric::Temperature, Metric::Humidity),
            Err(AnalyticsError::DivisionByZero { .. })
        ));

        let single = paired(&[1.0], &[2.0]);
        let window = Window::new(&single).unwrap();
        assert!(correlation(&window, Metric::Temperature, Metric::Humidity).is_err());
    }

    #[test]
    fn test_correlation_strength_boundaries() {
        // ---
        let cases = [
            (0.0, CorrelationStrength::Weak),
            (0.3, CorrelationStrength::Weak),
            (-0.3, CorrelationStrength::Weak),
            (0.3001, CorrelationStrength::Moderate),
            (-0.5, CorrelationStrength::Moderate),
            (0.7, CorrelationStrength::Moderate),
            (-0.7, CorrelationStrength::Moderate),
            (0.7001, CorrelationStrength::Strong),
            (-1.0, CorrelationStrength::Strong),
        ];
        for (r, expected) in cases {
            assert_eq!(CorrelationStrength::from_coefficient(r), expected, "r = {r}");
        }
    }
}
