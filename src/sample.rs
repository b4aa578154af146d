//! Deterministic placeholder series for a freshly deployed, empty store.

use chrono::{DateTime, Duration, Utc};

use crate::models::MeasurementRecord;

// ---

/// One record per day for `days` days, the last one at `end`.
///
/// Values follow smooth periodic curves around typical growing conditions,
/// so the same arguments always produce the same series.
pub fn generate(days: u32, end: DateTime<Utc>) -> Vec<MeasurementRecord> {
    // ---
    (0..days)
        .map(|i| {
            let back = i64::from(days - 1 - i);
            let t = f64::from(i);
            let weekly = (t * std::f64::consts::TAU / 7.0).sin();
            let monthly = (t * std::f64::consts::TAU / 30.0).cos();

            MeasurementRecord {
                timestamp: end - Duration::days(back),
                temperature: round1(21.0 + 3.5 * monthly + 1.5 * weekly),
                humidity: round1(60.0 + 8.0 * weekly - 4.0 * monthly),
                soil_moisture: round1(68.0 - 6.0 * weekly + 5.0 * monthly),
                water_usage: round1(12.0 + 3.0 * weekly + 2.0 * monthly),
                energy_consumption: round1(14.0 + 2.5 * monthly - 1.5 * weekly),
            }
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_series_shape() {
        // ---
        let end = Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap();
        let series = generate(90, end);

        assert_eq!(series.len(), 90);
        assert_eq!(series.last().unwrap().timestamp, end);
        assert_eq!(series[0].timestamp, end - Duration::days(89));
        assert!(series.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_values_pass_form_validation() {
        // ---
        let end = Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap();
        for r in generate(120, end) {
            let m = crate::models::NewMeasurement {
                temperature: r.temperature,
                humidity: r.humidity,
                soil_moisture: r.soil_moisture,
                water_usage: r.water_usage,
                energy_consumption: r.energy_consumption,
            };
            assert!(m.validate().is_ok(), "{r:?}");
        }
    }

    #[test]
    fn test_is_deterministic() {
        // ---
        let end = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(generate(30, end), generate(30, end));
        assert!(generate(0, end).is_empty());
    }
}
