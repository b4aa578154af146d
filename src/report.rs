//! One-call dashboard report over a window.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analytics::{
    calculate_environmental_impact, calculate_potential_savings, calculate_resource_efficiency,
    calculate_statistics, compare_region, generate_recommendations, EfficiencyReport,
    EnvironmentalImpact, Recommendation, RegionalReport, SavingsProjection, StatisticsSnapshot,
};
use crate::error::{AnalyticsError, Result};
use crate::models::Metric;
use crate::window::Window;

// ---

/// Where the window starts and ends and what it adds up to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSummary {
    pub record_count: usize,
    pub first_timestamp: DateTime<Utc>,
    pub last_timestamp: DateTime<Utc>,
    pub total_water_usage: f64,
    pub total_energy_consumption: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub window: WindowSummary,
    pub statistics: StatisticsSnapshot,
    pub efficiency: EfficiencyReport,
    pub recommendations: Vec<Recommendation>,
    pub savings: SavingsProjection,
    /// `None` when the impact could not be computed; the reason is in `notices`.
    pub environmental_impact: Option<EnvironmentalImpact>,
    pub regional: RegionalReport,
    pub notices: Vec<String>,
}

impl DashboardReport {
    /// Run every engine over `window`, comparing against `region`.
    ///
    /// An unknown region fails the whole build. A division-by-zero in the
    /// environmental impact only drops that section.
    pub fn build(window: &Window<'_>, region: &str) -> Result<Self> {
        // ---
        let regional = compare_region(window, region)?;

        let statistics = calculate_statistics(window);
        let efficiency = calculate_resource_efficiency(window);
        let recommendations = generate_recommendations(window, &statistics);
        let savings = calculate_potential_savings(window);

        let mut notices = Vec::new();
        let environmental_impact = match calculate_environmental_impact(window, &savings) {
            Ok(impact) => Some(impact),
            Err(e @ AnalyticsError::DivisionByZero { .. }) => {
                tracing::warn!("environmental impact skipped: {}", e);
                notices.push(e.to_string());
                None
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(
            records = window.len(),
            region,
            recommendations = recommendations.len(),
            "dashboard report built"
        );

        Ok(Self {
            window: WindowSummary {
                record_count: window.len(),
                first_timestamp: window.first().timestamp,
                last_timestamp: window.last().timestamp,
                total_water_usage: window.sum(Metric::WaterUsage),
                total_energy_consumption: window.sum(Metric::EnergyConsumption),
            },
            statistics,
            efficiency,
            recommendations,
            savings,
            environmental_impact,
            regional,
            notices,
        })
    }
}
