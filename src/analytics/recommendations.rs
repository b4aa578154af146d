//! Rule table turning current conditions into prioritized recommendations.
//!
//! Rules are evaluated in table order and each contributes at most one entry,
//! so the output order is the rule order. The table is fixed and carries no
//! state, which keeps the engine deterministic.

use serde::Serialize;

use super::statistics::{StatisticsSnapshot, Status};
use crate::models::Metric;
use crate::window::Window;

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    pub description: &'static str,
    pub impact: &'static str,
    pub priority: Priority,
}

/// Inputs every rule can look at.
pub struct RuleContext<'w, 's> {
    pub window: &'w Window<'w>,
    pub stats: &'s StatisticsSnapshot,
}

/// One predicate-to-recommendation rule.
pub struct Rule {
    pub name: &'static str,
    pub evaluate: fn(&RuleContext<'_, '_>) -> Option<Recommendation>,
}

/// Mean energy use above which efficiency measures are suggested, kWh.
pub const ENERGY_ALERT_THRESHOLD: f64 = 15.0;

pub const RULES: &[Rule] = &[
    Rule {
        name: "irrigation",
        evaluate: irrigation,
    },
    Rule {
        name: "temperature",
        evaluate: temperature,
    },
    Rule {
        name: "energy",
        evaluate: energy,
    },
    Rule {
        name: "humidity",
        evaluate: humidity,
    },
    Rule {
        name: "rainwater_harvesting",
        evaluate: rainwater_harvesting,
    },
    Rule {
        name: "solar_power",
        evaluate: solar_power,
    },
];

pub fn generate_recommendations(
    window: &Window<'_>,
    stats: &StatisticsSnapshot,
) -> Vec<Recommendation> {
    // ---
    let ctx = RuleContext { window, stats };
    RULES
        .iter()
        .filter_map(|rule| {
            let hit = (rule.evaluate)(&ctx);
            if let Some(rec) = &hit {
                tracing::debug!(rule = rule.name, title = rec.title, "recommendation rule fired");
            }
            hit
        })
        .collect()
}

// --- rules

fn irrigation(ctx: &RuleContext<'_, '_>) -> Option<Recommendation> {
    // ---
    let moisture = ctx.stats.soil_moisture.current;
    Some(if moisture > 80.0 {
        REDUCE_IRRIGATION
    } else if moisture < 50.0 {
        OPTIMIZE_IRRIGATION
    } else {
        MAINTAIN_IRRIGATION
    })
}

fn temperature(ctx: &RuleContext<'_, '_>) -> Option<Recommendation> {
    // ---
    let temp = &ctx.stats.temperature;
    if temp.status != Status::Critical {
        return None;
    }
    // Critical values inside [15, 28] cannot occur with the current bands;
    // such a value falls through with no entry.
    if temp.current > 28.0 {
        Some(HEAT_MITIGATION)
    } else if temp.current < 15.0 {
        Some(HEATING_OPTIMIZATION)
    } else {
        None
    }
}

fn energy(ctx: &RuleContext<'_, '_>) -> Option<Recommendation> {
    // ---
    let mean_energy = ctx.window.mean(Metric::EnergyConsumption);
    (mean_energy > ENERGY_ALERT_THRESHOLD).then_some(ENERGY_EFFICIENCY)
}

fn humidity(ctx: &RuleContext<'_, '_>) -> Option<Recommendation> {
    // ---
    let humidity = &ctx.stats.humidity;
    if humidity.status != Status::Critical {
        return None;
    }
    if humidity.current > 80.0 {
        Some(REDUCE_HUMIDITY)
    } else if humidity.current < 40.0 {
        Some(INCREASE_HUMIDITY)
    } else {
        None
    }
}

fn rainwater_harvesting(_: &RuleContext<'_, '_>) -> Option<Recommendation> {
    Some(RAINWATER_HARVESTING)
}

fn solar_power(_: &RuleContext<'_, '_>) -> Option<Recommendation> {
    Some(SOLAR_POWER)
}

// --- catalog

const REDUCE_IRRIGATION: Recommendation = Recommendation {
    title: "Reduce irrigation frequency",
    description: "Soil moisture levels are above optimal range. Consider reducing irrigation frequency by 25% for the next 3 days and monitor soil moisture levels.",
    impact: "Potential water savings of 20-30% while maintaining optimal soil moisture.",
    priority: Priority::High,
};

const OPTIMIZE_IRRIGATION: Recommendation = Recommendation {
    title: "Optimize irrigation schedule",
    description: "Soil moisture levels are below optimal range. Implement a drip irrigation system to deliver water directly to plant roots and reduce evaporation loss.",
    impact: "Increase water efficiency by 30-40% while improving plant health.",
    priority: Priority::High,
};

const MAINTAIN_IRRIGATION: Recommendation = Recommendation {
    title: "Maintain current irrigation schedule",
    description: "Soil moisture levels are within optimal range. Continue current irrigation practices but monitor for changing weather conditions.",
    impact: "Sustained optimal water usage efficiency.",
    priority: Priority::Medium,
};

const HEAT_MITIGATION: Recommendation = Recommendation {
    title: "Implement heat mitigation strategies",
    description: "Current temperatures exceed optimal growing conditions. Consider installing shade cloths, increasing ventilation, or using evaporative cooling systems during peak heat hours.",
    impact: "Reduce heat stress on plants and decrease water requirements by 15-20%.",
    priority: Priority::High,
};

const HEATING_OPTIMIZATION: Recommendation = Recommendation {
    title: "Optimize greenhouse heating",
    description: "Temperatures are below optimal growing range. Implement energy-efficient heating solutions like thermal curtains or heat retention systems.",
    impact: "Reduce energy consumption for heating by 20-25% while maintaining optimal growing temperatures.",
    priority: Priority::High,
};

const ENERGY_EFFICIENCY: Recommendation = Recommendation {
    title: "Implement energy efficiency measures",
    description: "Energy consumption is above optimal levels. Consider upgrading to LED lighting, installing energy-efficient pumps, and implementing automated controls for environmental systems.",
    impact: "Potential energy savings of 30-40% with minimal impact on production.",
    priority: Priority::Medium,
};

const REDUCE_HUMIDITY: Recommendation = Recommendation {
    title: "Reduce greenhouse humidity",
    description: "Current humidity levels are too high, increasing risk of fungal diseases. Improve ventilation and consider dehumidification during high-humidity periods.",
    impact: "Decrease disease pressure and potentially reduce fungicide applications by 20-30%.",
    priority: Priority::High,
};

const INCREASE_HUMIDITY: Recommendation = Recommendation {
    title: "Increase humidity levels",
    description: "Humidity is below optimal range. Consider using misting systems during dry periods to increase local humidity without excessive water usage.",
    impact: "Improve plant vigor and reduce water stress with minimal water input.",
    priority: Priority::Medium,
};

const RAINWATER_HARVESTING: Recommendation = Recommendation {
    title: "Implement rainwater harvesting",
    description: "Install rainwater collection systems to capture and store rainfall for irrigation purposes. This reduces reliance on municipal water supplies or groundwater.",
    impact: "Potential to offset 30-60% of irrigation water needs, depending on local rainfall patterns.",
    priority: Priority::Medium,
};

const SOLAR_POWER: Recommendation = Recommendation {
    title: "Consider solar power integration",
    description: "Evaluate the potential for solar panel installation to offset energy usage for pumps, lighting, and climate control systems.",
    impact: "Potential to reduce grid electricity consumption by 40-70% with a 3-7 year return on investment.",
    priority: Priority::Medium,
};
