//! The analytics pipeline. Every engine is a pure function of a [`Window`]
//! (and, for recommendations, the statistics derived from it).
//!
//! [`Window`]: crate::window::Window

pub mod efficiency;
pub mod recommendations;
pub mod regional;
pub mod savings;
pub mod statistics;

pub use efficiency::{calculate_resource_efficiency, EfficiencyReport, ResourceRatio};
pub use recommendations::{generate_recommendations, Priority, Recommendation};
pub use regional::{
    calculate_regional_comparison, compare_region, eco_impact_score, find_region,
    impact_recommendations, list_region_names, EcoImpactScore, ImpactCategory, ImpactRecommendation,
    RegionProfile, RegionalComparison, RegionalReport, REGIONS,
};
pub use savings::{
    calculate_environmental_impact, calculate_potential_savings, EnvironmentalImpact,
    SavingsProjection,
};
pub use statistics::{
    calculate_statistics, correlation, Correlation, CorrelationStrength, MetricSummary,
    StatisticsSnapshot, Status,
};
