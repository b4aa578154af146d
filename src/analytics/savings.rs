//! Projected savings from the recommendations and the resulting
//! environmental impact.

use serde::Serialize;

use crate::error::{AnalyticsError, Result};
use crate::models::Metric;
use crate::window::Window;

// ---

/// Policy reduction targets, in percent of window usage.
pub const WATER_SAVINGS_PERCENT: f64 = 25.0;
pub const ENERGY_SAVINGS_PERCENT: f64 = 30.0;

/// Cost per liter of water.
pub const WATER_COST_PER_LITER: f64 = 0.002;
/// Cost per kWh of energy.
pub const ENERGY_COST_PER_KWH: f64 = 0.15;

/// Carbon emitted per kWh.
pub const CARBON_PER_KWH: f64 = 0.5;
/// Carbon emitted per liter of water.
pub const CARBON_PER_LITER: f64 = 0.003;

const BASE_SUSTAINABILITY_SCORE: f64 = 60.0;
const MAX_EFFICIENCY_FACTOR: f64 = 20.0;
const MAX_OPTIMIZATION_FACTOR: f64 = 15.0;
const MAX_SCORE_CHANGE: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsProjection {
    pub water_savings: f64,
    pub water_savings_percent: f64,
    pub energy_savings: f64,
    pub energy_savings_percent: f64,
    pub water_cost_savings: f64,
    pub energy_cost_savings: f64,
    pub cost_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentalImpact {
    pub carbon_reduction: f64,
    pub carbon_reduction_percent: f64,
    pub water_conservation: f64,
    pub water_conservation_percent: f64,
    /// Composite score in [0, 100].
    pub sustainability_score: f64,
    pub sustainability_score_change: f64,
}

/// Apply the fixed reduction targets to the window's total usage.
pub fn calculate_potential_savings(window: &Window<'_>) -> SavingsProjection {
    // ---
    let water_savings = window.sum(Metric::WaterUsage) * WATER_SAVINGS_PERCENT / 100.0;
    let energy_savings = window.sum(Metric::EnergyConsumption) * ENERGY_SAVINGS_PERCENT / 100.0;

    let water_cost_savings = water_savings * WATER_COST_PER_LITER;
    let energy_cost_savings = energy_savings * ENERGY_COST_PER_KWH;

    SavingsProjection {
        water_savings,
        water_savings_percent: WATER_SAVINGS_PERCENT,
        energy_savings,
        energy_savings_percent: ENERGY_SAVINGS_PERCENT,
        water_cost_savings,
        energy_cost_savings,
        cost_savings: water_cost_savings + energy_cost_savings,
    }
}

/// Carbon reduction and sustainability score for a window and the savings
/// projected for it.
///
/// Fails with [`AnalyticsError::DivisionByZero`] when the window has no
/// carbon-producing usage at all, or when mean water or mean energy usage is
/// zero.
pub fn calculate_environmental_impact(
    window: &Window<'_>,
    savings: &SavingsProjection,
) -> Result<EnvironmentalImpact> {
    // ---
    let total_carbon_current = window.sum(Metric::EnergyConsumption) * CARBON_PER_KWH
        + window.sum(Metric::WaterUsage) * CARBON_PER_LITER;
    let carbon_reduction =
        savings.energy_savings * CARBON_PER_KWH + savings.water_savings * CARBON_PER_LITER;
    let carbon_reduction_percent =
        carbon_reduction / nonzero(total_carbon_current, "carbon reduction percent")? * 100.0;

    let mean_water = nonzero(window.mean(Metric::WaterUsage), "water efficiency factor")?;
    let mean_energy = nonzero(
        window.mean(Metric::EnergyConsumption),
        "resource optimization factor",
    )?;

    let efficiency_factor =
        (window.mean(Metric::SoilMoisture) / mean_water * 100.0).min(MAX_EFFICIENCY_FACTOR);
    let optimization_factor = ((1.0 - window.std_dev(Metric::EnergyConsumption) / mean_energy)
        * 30.0)
        .min(MAX_OPTIMIZATION_FACTOR);

    let sustainability_score =
        (BASE_SUSTAINABILITY_SCORE + efficiency_factor + optimization_factor).clamp(0.0, 100.0);

    // Depends only on the policy percentages, so it is the same for every window.
    let sustainability_score_change =
        ((savings.water_savings_percent + savings.energy_savings_percent) / 4.0)
            .clamp(0.0, MAX_SCORE_CHANGE);

    Ok(EnvironmentalImpact {
        carbon_reduction,
        carbon_reduction_percent,
        water_conservation: savings.water_savings,
        water_conservation_percent: savings.water_savings_percent,
        sustainability_score,
        sustainability_score_change,
    })
}

fn nonzero(denominator: f64, quantity: &'static str) -> Result<f64> {
    // ---
    if denominator == 0.0 {
        return Err(AnalyticsError::DivisionByZero { quantity });
    }
    Ok(denominator)
}
