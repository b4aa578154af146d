//! Comparison of site usage against regional baseline profiles.

use serde::Serialize;

use super::recommendations::Priority;
use crate::error::{AnalyticsError, Result};
use crate::models::Metric;
use crate::window::Window;

// ---

/// Typical climate and resource use for a named region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionProfile {
    pub name: &'static str,
    /// °C
    pub avg_temp: f64,
    /// %
    pub avg_humidity: f64,
    /// mm per year
    pub avg_rainfall: f64,
    pub water_usage: f64,
    pub energy_consumption: f64,
    pub carbon_footprint: f64,
}

/// The fixed region catalog.
pub static REGIONS: [RegionProfile; 6] = [
    RegionProfile {
        name: "Northeast",
        avg_temp: 11.2,
        avg_humidity: 68.5,
        avg_rainfall: 1050.0,
        water_usage: 18.5,
        energy_consumption: 22.3,
        carbon_footprint: 15.2,
    },
    RegionProfile {
        name: "Southeast",
        avg_temp: 18.7,
        avg_humidity: 75.2,
        avg_rainfall: 1270.0,
        water_usage: 22.1,
        energy_consumption: 19.8,
        carbon_footprint: 14.5,
    },
    RegionProfile {
        name: "Midwest",
        avg_temp: 13.4,
        avg_humidity: 65.8,
        avg_rainfall: 920.0,
        water_usage: 16.2,
        energy_consumption: 21.7,
        carbon_footprint: 16.8,
    },
    RegionProfile {
        name: "Southwest",
        avg_temp: 24.3,
        avg_humidity: 45.2,
        avg_rainfall: 380.0,
        water_usage: 28.4,
        energy_consumption: 27.5,
        carbon_footprint: 19.3,
    },
    RegionProfile {
        name: "West",
        avg_temp: 16.2,
        avg_humidity: 58.6,
        avg_rainfall: 760.0,
        water_usage: 24.7,
        energy_consumption: 18.9,
        carbon_footprint: 13.4,
    },
    RegionProfile {
        name: "Pacific Northwest",
        avg_temp: 12.8,
        avg_humidity: 73.2,
        avg_rainfall: 1150.0,
        water_usage: 12.9,
        energy_consumption: 16.4,
        carbon_footprint: 11.8,
    },
];

/// Carbon estimate used for regional comparison, per liter of water.
pub const REGIONAL_CARBON_PER_LITER: f64 = 0.005;
/// Carbon estimate used for regional comparison, per kWh.
pub const REGIONAL_CARBON_PER_KWH: f64 = 0.4;

const WATER_SCORE_CAP: f64 = 35.0;
const ENERGY_SCORE_CAP: f64 = 35.0;
const CARBON_SCORE_CAP: f64 = 30.0;
const BELOW_BASELINE_WEIGHT: f64 = 0.3;
const ABOVE_BASELINE_WEIGHT: f64 = 0.5;

const DIFF_ALERT_PERCENT: f64 = 10.0;
const DIFF_HIGH_PRIORITY_PERCENT: f64 = 25.0;

pub fn list_region_names() -> Vec<&'static str> {
    REGIONS.iter().map(|r| r.name).collect()
}

/// Exact-name catalog lookup.
pub fn find_region(name: &str) -> Result<&'static RegionProfile> {
    // ---
    REGIONS.iter().find(|r| r.name == name).ok_or_else(|| {
        tracing::debug!(region = name, "region not in catalog");
        AnalyticsError::UnknownRegion(name.to_string())
    })
}

/// Site value, regional baseline and the relative difference for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsageComparison {
    pub current: f64,
    pub region: f64,
    pub diff_percent: f64,
}

impl UsageComparison {
    fn new(current: f64, region: f64) -> Self {
        Self {
            current,
            region,
            diff_percent: diff_percent(current, region),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalComparison {
    pub region: RegionProfile,
    pub water_usage: UsageComparison,
    pub energy_consumption: UsageComparison,
    /// `current` here is the estimated site carbon footprint.
    pub carbon_footprint: UsageComparison,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EcoImpactScore {
    pub total_score: f64,
    pub water_impact_score: f64,
    pub energy_impact_score: f64,
    pub carbon_impact_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ImpactCategory {
    #[serde(rename = "Water Usage")]
    WaterUsage,
    #[serde(rename = "Energy Consumption")]
    EnergyConsumption,
    #[serde(rename = "Carbon Footprint")]
    CarbonFootprint,
    #[serde(rename = "Overall Impact")]
    Overall,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactRecommendation {
    pub category: ImpactCategory,
    pub recommendation: String,
    pub priority: Priority,
}

/// Comparison, score and recommendations for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalReport {
    pub comparison: RegionalComparison,
    pub score: EcoImpactScore,
    pub recommendations: Vec<ImpactRecommendation>,
}

/// `(current - baseline) / baseline`, in percent.
pub fn diff_percent(current: f64, baseline: f64) -> f64 {
    (current - baseline) / baseline * 100.0
}

pub fn calculate_regional_comparison(
    window: &Window<'_>,
    region_name: &str,
) -> Result<RegionalComparison> {
    // ---
    let region = find_region(region_name)?;

    let current_water = window.mean(Metric::WaterUsage);
    let current_energy = window.mean(Metric::EnergyConsumption);
    let estimated_carbon =
        current_water * REGIONAL_CARBON_PER_LITER + current_energy * REGIONAL_CARBON_PER_KWH;

    Ok(RegionalComparison {
        region: *region,
        water_usage: UsageComparison::new(current_water, region.water_usage),
        energy_consumption: UsageComparison::new(current_energy, region.energy_consumption),
        carbon_footprint: UsageComparison::new(estimated_carbon, region.carbon_footprint),
    })
}

/// Points left of `cap` after the deviation penalty. Exceeding the baseline
/// costs more per percent than beating it.
fn sub_score(diff: f64, cap: f64) -> f64 {
    // ---
    let raw = if diff <= 0.0 {
        cap - diff.abs() * BELOW_BASELINE_WEIGHT
    } else {
        cap - diff * ABOVE_BASELINE_WEIGHT
    };
    raw.clamp(0.0, cap)
}

pub fn eco_impact_score(comparison: &RegionalComparison) -> EcoImpactScore {
    // ---
    let water_impact_score = sub_score(comparison.water_usage.diff_percent, WATER_SCORE_CAP);
    let energy_impact_score =
        sub_score(comparison.energy_consumption.diff_percent, ENERGY_SCORE_CAP);
    let carbon_impact_score =
        sub_score(comparison.carbon_footprint.diff_percent, CARBON_SCORE_CAP);
    let total = water_impact_score + energy_impact_score + carbon_impact_score;

    EcoImpactScore {
        total_score: total.clamp(0.0, 100.0),
        water_impact_score,
        energy_impact_score,
        carbon_impact_score,
    }
}

pub fn impact_recommendations(comparison: &RegionalComparison) -> Vec<ImpactRecommendation> {
    // ---
    let checks = [
        (
            ImpactCategory::WaterUsage,
            comparison.water_usage.diff_percent,
            "Your water usage is {diff}% higher than the regional average. Consider implementing water conservation techniques appropriate for your region's climate.",
        ),
        (
            ImpactCategory::EnergyConsumption,
            comparison.energy_consumption.diff_percent,
            "Your energy consumption is {diff}% higher than the regional average. Consider energy efficiency improvements tailored to your region's climate conditions.",
        ),
        (
            ImpactCategory::CarbonFootprint,
            comparison.carbon_footprint.diff_percent,
            "Your carbon footprint is {diff}% higher than the regional average. Consider renewable energy sources and carbon offset programs.",
        ),
    ];

    let mut recommendations: Vec<ImpactRecommendation> = checks
        .into_iter()
        .filter(|(_, diff, _)| *diff > DIFF_ALERT_PERCENT)
        .map(|(category, diff, template)| ImpactRecommendation {
            category,
            recommendation: template.replace("{diff}", &format!("{diff:.1}")),
            priority: if diff > DIFF_HIGH_PRIORITY_PERCENT {
                Priority::High
            } else {
                Priority::Medium
            },
        })
        .collect();

    if recommendations.is_empty() {
        recommendations.push(ImpactRecommendation {
            category: ImpactCategory::Overall,
            recommendation: "Your environmental metrics are close to or better than regional averages. Continue your sustainable practices.".to_string(),
            priority: Priority::Low,
        });
    }
    recommendations
}

/// Full regional analysis. An unknown region fails before anything is
/// computed, so no partial comparison is ever returned.
pub fn compare_region(window: &Window<'_>, region_name: &str) -> Result<RegionalReport> {
    // ---
    let comparison = calculate_regional_comparison(window, region_name)?;
    let score = eco_impact_score(&comparison);
    let recommendations = impact_recommendations(&comparison);
    Ok(RegionalReport {
        comparison,
        score,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::MeasurementRecord;
    use chrono::{TimeZone, Utc};

    fn site(water: f64, energy: f64) -> Vec<MeasurementRecord> {
        // ---
        vec![MeasurementRecord {
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
            temperature: 20.0,
            humidity: 60.0,
            soil_moisture: 70.0,
            water_usage: water,
            energy_consumption: energy,
        }]
    }

    #[test]
    fn test_catalog_names_in_order() {
        // ---
        assert_eq!(
            list_region_names(),
            vec!["Northeast", "Southeast", "Midwest", "Southwest", "West", "Pacific Northwest"]
        );
    }

    #[test]
    fn test_lookup_is_exact() {
        // ---
        assert_eq!(find_region("West").unwrap().water_usage, 24.7);
        assert_eq!(
            find_region("west"),
            Err(AnalyticsError::UnknownRegion("west".to_string()))
        );
        assert!(find_region("Pacific Northwest ").is_err());
    }

    #[test]
    fn test_unknown_region_returns_nothing_partial() {
        // ---
        let records = site(10.0, 10.0);
        let window = Window::new(&records).unwrap();
        assert_eq!(
            compare_region(&window, "Atlantis"),
            Err(AnalyticsError::UnknownRegion("Atlantis".to_string()))
        );
    }

    #[test]
    fn test_southwest_scenario() {
        // ---
        let records = site(28.4, 27.5);
        let window = Window::new(&records).unwrap();
        let report = compare_region(&window, "Southwest").unwrap();

        assert_eq!(report.comparison.water_usage.diff_percent, 0.0);
        assert_eq!(report.comparison.energy_consumption.diff_percent, 0.0);
        assert!((report.comparison.carbon_footprint.current - 11.142).abs() < 1e-9);

        let carbon_diff = (11.142 - 19.3) / 19.3 * 100.0;
        assert!((report.comparison.carbon_footprint.diff_percent - carbon_diff).abs() < 1e-9);

        assert_eq!(report.score.water_impact_score, 35.0);
        assert_eq!(report.score.energy_impact_score, 35.0);
        assert!((report.score.carbon_impact_score - 17.319171).abs() < 1e-4);
        assert!((report.score.total_score - 87.319171).abs() < 1e-4);

        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.recommendations[0].category, ImpactCategory::Overall);
        assert_eq!(report.recommendations[0].priority, Priority::Low);
    }

    #[test]
    fn test_matching_baseline_scores_full_cap() {
        // ---
        for region in &REGIONS {
            assert_eq!(diff_percent(region.water_usage, region.water_usage), 0.0);
            assert_eq!(sub_score(0.0, WATER_SCORE_CAP), WATER_SCORE_CAP);
            assert_eq!(sub_score(0.0, CARBON_SCORE_CAP), CARBON_SCORE_CAP);
        }
    }

    #[test]
    fn test_penalty_is_asymmetric() {
        // ---
        assert_eq!(sub_score(-20.0, 35.0), 29.0);
        assert_eq!(sub_score(20.0, 35.0), 25.0);
        assert_eq!(sub_score(500.0, 35.0), 0.0);
        assert_eq!(sub_score(-500.0, 30.0), 0.0);
    }

    #[test]
    fn test_scores_stay_within_caps() {
        // ---
        for region in &REGIONS {
            let usages = [(0.0, 0.0), (5.0, 100.0), (100.0, 5.0), (12.9, 16.4), (100.0, 100.0)];
            for (water, energy) in usages {
                let records = site(water, energy);
                let window = Window::new(&records).unwrap();
                let score = compare_region(&window, region.name).unwrap().score;

                assert!((0.0..=35.0).contains(&score.water_impact_score));
                assert!((0.0..=35.0).contains(&score.energy_impact_score));
                assert!((0.0..=30.0).contains(&score.carbon_impact_score));
                assert!((0.0..=100.0).contains(&score.total_score));
            }
        }
    }

    #[test]
    fn test_high_usage_recommendations() {
        // ---
        // Northeast: water 18.5 -> +20% is Medium; energy 22.3 -> +50% is High.
        let records = site(18.5 * 1.2, 22.3 * 1.5);
        let window = Window::new(&records).unwrap();
        let recs = compare_region(&window, "Northeast").unwrap().recommendations;

        assert_eq!(recs[0].category, ImpactCategory::WaterUsage);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert!(recs[0].recommendation.starts_with("Your water usage is 20.0% higher"));
        assert_eq!(recs[1].category, ImpactCategory::EnergyConsumption);
        assert_eq!(recs[1].priority, Priority::High);
        assert!(recs.iter().all(|r| r.category != ImpactCategory::Overall));
    }
}
