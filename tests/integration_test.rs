//! HTTP tests against a running service (`BASE_URL`, default
//! `http://localhost:8080`) backed by a live database. Run with
//! `cargo test -- --ignored`.

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StatusSummary {
    current: f64,
    average: f64,
    change: f64,
    status: String,
}

#[derive(Debug, Deserialize)]
struct Statistics {
    temperature: StatusSummary,
    humidity: StatusSummary,
    soil_moisture: StatusSummary,
}

#[derive(Debug, Deserialize)]
struct Efficiency {
    water_usage_efficiency_percent: f64,
    energy_consumption_efficiency_percent: f64,
    overall_score: f64,
}

#[derive(Debug, Deserialize)]
struct Recommendation {
    title: String,
    priority: String,
}

#[derive(Debug, Deserialize)]
struct Score {
    total_score: f64,
    water_impact_score: f64,
    energy_impact_score: f64,
    carbon_impact_score: f64,
}

#[derive(Debug, Deserialize)]
struct Regional {
    score: Score,
}

#[derive(Debug, Deserialize)]
struct Dashboard {
    statistics: Statistics,
    efficiency: Efficiency,
    recommendations: Vec<Recommendation>,
    regional: Regional,
}

fn base_url() -> String {
    std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into())
}

#[tokio::test]
#[ignore = "needs a running service and database"]
async fn dashboard_endpoint_scores_in_range() -> Result<()> {
    // ---
    let url = format!("{}/dashboard?range=all_time&region=Midwest", base_url());
    let report: Dashboard = Client::new().get(&url).send().await?.json().await?;

    for summary in [
        &report.statistics.temperature,
        &report.statistics.humidity,
        &report.statistics.soil_moisture,
    ] {
        assert!(
            (summary.change - (summary.current - summary.average)).abs() < 1e-6,
            "change should be current - average: {:?}",
            summary
        );
        assert!(["optimal", "warning", "critical"].contains(&summary.status.as_str()));
    }

    for value in [
        report.efficiency.water_usage_efficiency_percent,
        report.efficiency.energy_consumption_efficiency_percent,
        report.efficiency.overall_score,
    ] {
        assert!((0.0..=100.0).contains(&value), "efficiency {value} out of range");
    }

    assert!(report.recommendations.len() >= 3);
    assert_eq!(
        report.recommendations.last().map(|r| r.title.as_str()),
        Some("Consider solar power integration")
    );
    assert!(report
        .recommendations
        .iter()
        .all(|r| ["High", "Medium", "Low"].contains(&r.priority.as_str())));

    let score = &report.regional.score;
    assert!((0.0..=35.0).contains(&score.water_impact_score));
    assert!((0.0..=35.0).contains(&score.energy_impact_score));
    assert!((0.0..=30.0).contains(&score.carbon_impact_score));
    assert!((0.0..=100.0).contains(&score.total_score));

    Ok(())
}

#[tokio::test]
#[ignore = "needs a running service and database"]
async fn unknown_region_is_rejected() -> Result<()> {
    // ---
    let url = format!("{}/dashboard?range=all_time&region=Atlantis", base_url());
    let response = Client::new().get(&url).send().await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
#[ignore = "needs a running service and database"]
async fn invalid_measurement_is_rejected() -> Result<()> {
    // ---
    let url = format!("{}/measurements", base_url());
    let response = Client::new()
        .post(&url)
        .json(&serde_json::json!({
            "temperature": 80.0,
            "humidity": 60.0,
            "soil_moisture": 70.0,
            "water_usage": 10.0,
            "energy_consumption": 15.0
        }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
#[ignore = "needs a running service and database"]
async fn regions_are_listed_in_catalog_order() -> Result<()> {
    // ---
    let url = format!("{}/regions", base_url());
    let names: Vec<String> = Client::new().get(&url).send().await?.json().await?;
    assert_eq!(names.first().map(String::as_str), Some("Northeast"));
    assert_eq!(names.len(), 6);
    Ok(())
}

#[tokio::test]
#[ignore = "needs a running service and database"]
async fn correlation_endpoint_checks_metric_pair() -> Result<()> {
    // ---
    let client = Client::new();

    let url = format!(
        "{}/correlation?x=temperature&y=energy_consumption&range=all_time",
        base_url()
    );
    let body: serde_json::Value = client.get(&url).send().await?.json().await?;
    let r = body["coefficient"].as_f64().unwrap_or(f64::NAN);
    assert!((-1.0..=1.0).contains(&r), "coefficient {r} out of range");
    assert!(["strong", "moderate", "weak"].contains(&body["strength"].as_str().unwrap_or("")));

    let url = format!("{}/correlation?x=humidity&y=humidity", base_url());
    let response = client.get(&url).send().await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

