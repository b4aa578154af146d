//! Data models for agricultural site measurements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---

/// Measurement as submitted by the entry form, before it is timestamped.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct NewMeasurement {
    // ---
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
    pub water_usage: f64,
    pub energy_consumption: f64,
}

/// One stored measurement. Immutable once created.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, sqlx::FromRow)]
pub struct MeasurementRecord {
    // ---
    #[sqlx(rename = "recorded_at")]
    pub timestamp: DateTime<Utc>,
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    /// Soil moisture in %.
    pub soil_moisture: f64,
    /// Water used, in liters.
    pub water_usage: f64,
    /// Energy used, in kWh.
    pub energy_consumption: f64,
}

/// The five measured quantities, used to select a column out of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Humidity,
    SoilMoisture,
    WaterUsage,
    EnergyConsumption,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::SoilMoisture,
        Metric::WaterUsage,
        Metric::EnergyConsumption,
    ];

    pub fn value(self, record: &MeasurementRecord) -> f64 {
        // ---
        match self {
            Metric::Temperature => record.temperature,
            Metric::Humidity => record.humidity,
            Metric::SoilMoisture => record.soil_moisture,
            Metric::WaterUsage => record.water_usage,
            Metric::EnergyConsumption => record.energy_consumption,
        }
    }

    pub fn name(self) -> &'static str {
        // ---
        match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::SoilMoisture => "soil_moisture",
            Metric::WaterUsage => "water_usage",
            Metric::EnergyConsumption => "energy_consumption",
        }
    }

    /// Accepted input range for the entry form.
    fn input_range(self) -> (f64, f64) {
        // ---
        match self {
            Metric::Temperature => (-10.0, 50.0),
            Metric::Humidity | Metric::SoilMoisture => (0.0, 100.0),
            Metric::WaterUsage | Metric::EnergyConsumption => (0.0, 100.0),
        }
    }
}

/// A submitted value outside the accepted input range.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field} value {value} is outside the accepted range [{min}, {max}]")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl NewMeasurement {
    // ---
    fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::SoilMoisture => self.soil_moisture,
            Metric::WaterUsage => self.water_usage,
            Metric::EnergyConsumption => self.energy_consumption,
        }
    }

    /// Check every field against the entry form ranges. NaN and infinities
    /// are always rejected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        // ---
        for metric in Metric::ALL {
            let value = self.value(metric);
            let (min, max) = metric.input_range();
            if !value.is_finite() || value < min || value > max {
                return Err(ValidationError {
                    field: metric.name(),
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Stamp the measurement with the time it was recorded.
    pub fn into_record(self, timestamp: DateTime<Utc>) -> MeasurementRecord {
        // ---
        MeasurementRecord {
            timestamp,
            temperature: self.temperature,
            humidity: self.humidity,
            soil_moisture: self.soil_moisture,
            water_usage: self.water_usage,
            energy_consumption: self.energy_consumption,
        }
    }
}
