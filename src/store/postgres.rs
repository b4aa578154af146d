use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::MeasurementStore;
use crate::models::{MeasurementRecord, NewMeasurement};
use crate::window::TimeSeries;

// ---

/// Store backed by the `environmental_metrics` table.
///
/// The table is created by the service's schema setup before the store is used.
#[derive(Debug, Clone)]
pub struct PgMeasurementStore {
    pool: PgPool,
}

impl PgMeasurementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn insert_record(
    conn: &mut PgConnection,
    record: &MeasurementRecord,
) -> Result<(), sqlx::Error> {
    // ---
    sqlx::query(
        r#"
        INSERT INTO environmental_metrics (
            id, recorded_at, temperature, humidity,
            soil_moisture, water_usage, energy_consumption
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(record.timestamp)
    .bind(record.temperature)
    .bind(record.humidity)
    .bind(record.soil_moisture)
    .bind(record.water_usage)
    .bind(record.energy_consumption)
    .execute(conn)
    .await?;

    Ok(())
}

impl MeasurementStore for PgMeasurementStore {
    async fn load_all(&self) -> Result<TimeSeries> {
        // ---
        let records: Vec<MeasurementRecord> = sqlx::query_as(
            r#"
            SELECT recorded_at, temperature, humidity,
                   soil_moisture, water_usage, energy_consumption
            FROM environmental_metrics
            ORDER BY recorded_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Error loading measurements from database")?;

        tracing::debug!("Loaded {} measurement records", records.len());
        Ok(TimeSeries::from_records(records))
    }

    async fn append(&self, measurement: NewMeasurement) -> bool {
        // ---
        let record = measurement.into_record(Utc::now());
        let inserted = async {
            let mut conn = self.pool.acquire().await?;
            insert_record(&mut conn, &record).await
        };
        match inserted.await {
            Ok(()) => {
                tracing::info!("Added new metrics record at {}", record.timestamp);
                true
            }
            Err(e) => {
                tracing::error!("Error adding new metrics record: {}", e);
                false
            }
        }
    }

    async fn append_batch(&self, records: Vec<MeasurementRecord>) -> Result<usize> {
        // ---
        let mut tx = self.pool.begin().await?;
        for record in &records {
            insert_record(&mut *tx, record).await?;
        }
        tx.commit().await?;

        tracing::info!("Inserted {} records into database", records.len());
        Ok(records.len())
    }

    async fn check_connection(&self) -> bool {
        // ---
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Database connection check failed: {}", e);
                false
            }
        }
    }
}
