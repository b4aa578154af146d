//! Database schema management for `codemetal-agrimetrics`.
//!
//! Ensures the measurement table and its index exist before serving requests.
//! Applied once on startup from `main.rs`.

use anyhow::Result;
use sqlx::PgPool;

// ---

/// Create the schema if missing (idempotent).
///
/// Creates the `environmental_metrics` table read and written by
/// `PgMeasurementStore`. Safe to call on every startup.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS environmental_metrics (
            id                 UUID             PRIMARY KEY,
            recorded_at        TIMESTAMPTZ      NOT NULL,
            temperature        DOUBLE PRECISION NOT NULL,
            humidity           DOUBLE PRECISION NOT NULL,
            soil_moisture      DOUBLE PRECISION NOT NULL,
            water_usage        DOUBLE PRECISION NOT NULL,
            energy_consumption DOUBLE PRECISION NOT NULL
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Every load is ordered by time
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_environmental_metrics_recorded_at
            ON environmental_metrics (recorded_at);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
