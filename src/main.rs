//! Application entry point for the `codemetal-agrimetrics` service.
//!
//! This binary orchestrates the startup sequence:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Establishing a PostgreSQL connection pool
//! - Creating the database schema if it does not exist
//! - Seeding an empty store with the placeholder series (optional)
//! - Mounting all API routes via the `routes` gateway (EMBP pattern)
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `DATABASE_URL` (**required**) – PostgreSQL connection string
//! - `DB_POOL_MAX` (optional) – maximum number of DB connections (default: 5)
//! - `LISTEN_PORT` (optional) – HTTP port (default: 8080)
//! - `DEFAULT_REGION` (optional) – eco-impact comparison region (default: `Northeast`)
//! - `SEED_SAMPLE_DATA` (optional) – seed an empty store (default: true)
//! - `AGRI_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `AGRI_SPAN_EVENTS` (optional) – span event mode for tracing
//!
//! The analytics themselves live in the `codemetal_agrimetrics` library; this
//! binary only wires them to storage and HTTP.
use std::{env, net::SocketAddr};

use axum::Router;
use chrono::Utc;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use anyhow::Result;
use codemetal_agrimetrics::{sample, MeasurementStore, PgMeasurementStore};

mod config;
mod routes;
mod schema;

pub use config::Config;

/// Days of placeholder data written into an empty store.
const SAMPLE_DAYS: u32 = 90;

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    init_tracing();
    dotenv().ok();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    tracing::info!("Attempting to connect to database");

    let pool = PgPoolOptions::new()
        .max_connections(cfg.db_pool_max)
        .connect(&cfg.db_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    tracing::info!("Successfully connected to database");

    schema::create_schema(&pool).await?;

    let store = PgMeasurementStore::new(pool);
    if cfg.seed_sample_data {
        seed_if_empty(&store).await?;
    }

    // Build app from routes gateway (EMBP)
    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.listen_port));
    let app: Router = routes::router(store, cfg);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---

/// Write the placeholder series when the store holds no records yet.
async fn seed_if_empty<S: MeasurementStore>(store: &S) -> Result<()> {
    // ---
    if !store.load_all().await?.is_empty() {
        return Ok(());
    }

    tracing::info!("No data in database, initializing with sample data");
    let inserted = store
        .append_batch(sample::generate(SAMPLE_DAYS, Utc::now()))
        .await?;
    tracing::info!("Seeded {} sample records", inserted);
    Ok(())
}

/// Initialize the global tracing subscriber for structured logging.
///
/// Configures [`tracing_subscriber`] with:
/// - Log target, file, and line number output enabled
/// - Color output controlled by `FORCE_COLOR` (`1|true|yes` on, `0|false|no`
///   off), otherwise TTY detection
/// - Span event emission mode from `AGRI_SPAN_EVENTS`:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log level from `RUST_LOG`, else `AGRI_LOG_LEVEL`
///
/// Call once at startup, before any tracing macro runs.
fn init_tracing() {
    // ---
    let span_events = match env::var("AGRI_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("AGRI_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "debug",
        };
        EnvFilter::new(format!("{level},sqlx::query=warn"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
