//! Resource efficiency against fixed baseline rates.

use serde::Serialize;

use crate::models::Metric;
use crate::window::Window;

// ---

/// Reference water use, liters per % of soil moisture.
pub const WATER_BASELINE: f64 = 2.5;
/// Reference energy use, kWh per °C.
pub const ENERGY_BASELINE: f64 = 1.2;

const WATER_TARGET_FACTOR: f64 = 0.7;
const ENERGY_TARGET_FACTOR: f64 = 0.75;

/// Usage-per-unit ratio for one resource.
///
/// Ratios are taken per record and then averaged. Records whose denominator
/// is zero or negative are left out and counted in `skipped_records`. The
/// ratio is `None` (not computable) when the window mean of the denominator
/// is zero or when no record is usable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResourceRatio {
    pub ratio: Option<f64>,
    pub vs_baseline: Option<f64>,
    pub skipped_records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyReport {
    pub water_efficiency: ResourceRatio,
    pub energy_efficiency: ResourceRatio,
    pub optimal_water_usage: f64,
    pub optimal_energy_consumption: f64,
    pub current_water_usage: f64,
    pub current_energy_consumption: f64,
    pub water_usage_efficiency_percent: f64,
    pub energy_consumption_efficiency_percent: f64,
    /// Mean of the two efficiency percentages.
    pub overall_score: f64,
}

pub fn calculate_resource_efficiency(window: &Window<'_>) -> EfficiencyReport {
    // ---
    let water_efficiency = per_record_ratio(
        window,
        Metric::WaterUsage,
        Metric::SoilMoisture,
        WATER_BASELINE,
    );
    let energy_efficiency = per_record_ratio(
        window,
        Metric::EnergyConsumption,
        Metric::Temperature,
        ENERGY_BASELINE,
    );

    let optimal_water_usage =
        window.mean(Metric::SoilMoisture) * (WATER_BASELINE * WATER_TARGET_FACTOR);
    let optimal_energy_consumption =
        window.mean(Metric::Temperature) * (ENERGY_BASELINE * ENERGY_TARGET_FACTOR);

    let current_water_usage = window.mean(Metric::WaterUsage);
    let current_energy_consumption = window.mean(Metric::EnergyConsumption);

    let water_usage_efficiency_percent =
        efficiency_percent(current_water_usage, optimal_water_usage);
    let energy_consumption_efficiency_percent =
        efficiency_percent(current_energy_consumption, optimal_energy_consumption);

    EfficiencyReport {
        water_efficiency,
        energy_efficiency,
        optimal_water_usage,
        optimal_energy_consumption,
        current_water_usage,
        current_energy_consumption,
        water_usage_efficiency_percent,
        energy_consumption_efficiency_percent,
        overall_score: (water_usage_efficiency_percent + energy_consumption_efficiency_percent)
            / 2.0,
    }
}

fn per_record_ratio(
    window: &Window<'_>,
    usage: Metric,
    per: Metric,
    baseline: f64,
) -> ResourceRatio {
    // ---
    let mut total = 0.0;
    let mut used = 0usize;
    for record in window.records() {
        let denominator = per.value(record);
        if denominator > 0.0 {
            total += usage.value(record) / denominator;
            used += 1;
        }
    }

    let skipped_records = window.len() - used;
    if skipped_records > 0 {
        tracing::warn!(
            usage = usage.name(),
            per = per.name(),
            skipped_records,
            "records with non-positive denominator left out of efficiency ratio"
        );
    }

    let mean_denominator = window.mean(per);
    if mean_denominator == 0.0 {
        tracing::warn!(per = per.name(), "mean is zero, efficiency ratio not computable");
    }

    let ratio = (used > 0 && mean_denominator != 0.0).then(|| total / used as f64);
    ResourceRatio {
        ratio,
        vs_baseline: ratio.map(|r| r / baseline),
        skipped_records,
    }
}

/// 100 when usage is at or under target, otherwise the share of usage the
/// target represents. Always within [0, 100].
fn efficiency_percent(current: f64, optimal: f64) -> f64 {
    // ---
    if current <= optimal {
        100.0
    } else if optimal <= 0.0 {
        0.0
    } else {
        (optimal / current * 100.0).clamp(0.0, 100.0)
    }
}
