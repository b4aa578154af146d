//! Configuration loader for the `codemetal-agrimetrics` service.
//!
//! All runtime settings and their defaults live here, loaded from environment
//! variables (the caller may seed them from a `.env` file first). Nothing else
//! in the service reads `env::var` for configuration.
use std::env;

use anyhow::{anyhow, Result};
use codemetal_agrimetrics::analytics::find_region;

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration, immutable once loaded.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// PostgreSQL connection string.
    pub db_url: String,

    /// Maximum number of database connections in the pool.
    pub db_pool_max: u32,

    /// TCP port the HTTP server binds to.
    pub listen_port: u16,

    /// Region used for the eco-impact comparison when a request names none.
    pub default_region: String,

    /// Seed an empty store with the placeholder series at startup.
    pub seed_sample_data: bool,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `DATABASE_URL` – PostgreSQL connection string
///
/// Optional:
/// - `DB_POOL_MAX` – max DB connections (default: 5)
/// - `LISTEN_PORT` – HTTP port (default: 8080)
/// - `DEFAULT_REGION` – catalog region name (default: `Northeast`)
/// - `SEED_SAMPLE_DATA` – `true`/`false` (default: `true`)
///
/// Returns an error if any required variable is missing or any value is invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let db_url = require_env!("DATABASE_URL");
    let db_pool_max = parse_env_u32!("DB_POOL_MAX", 5);
    let listen_port = u16::try_from(parse_env_u32!("LISTEN_PORT", 8080))
        .map_err(|e| anyhow!("Invalid LISTEN_PORT: {}", e))?;

    let default_region = env::var("DEFAULT_REGION").unwrap_or_else(|_| "Northeast".to_string());
    find_region(&default_region).map_err(|e| anyhow!("Invalid DEFAULT_REGION: {}", e))?;

    let seed_sample_data = match env::var("SEED_SAMPLE_DATA") {
        Ok(v) => parse_bool(&v).ok_or_else(|| anyhow!("Invalid SEED_SAMPLE_DATA: {}", v))?,
        Err(_) => true,
    };

    Ok(Config {
        db_url,
        db_pool_max,
        listen_port,
        default_region,
        seed_sample_data,
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    // ---
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Replace the password part of a connection URL with `****`.
fn mask_db_url(url: &str) -> String {
    // ---
    if let Some(at_pos) = url.rfind('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            // `postgres://user@host` has only the scheme colon before '@'
            let scheme_only = url[..colon_pos].ends_with("postgres")
                || url[..colon_pos].ends_with("postgresql");
            if !scheme_only {
                return format!("{}:****{}", &url[..colon_pos], &url[at_pos..]);
            }
        }
    }
    url.to_string()
}

impl Config {
    /// Log the loaded configuration, database password masked.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  DATABASE_URL     : {}", mask_db_url(&self.db_url));
        tracing::info!("  DB_POOL_MAX      : {}", self.db_pool_max);
        tracing::info!("  LISTEN_PORT      : {}", self.listen_port);
        tracing::info!("  DEFAULT_REGION   : {}", self.default_region);
        tracing::info!("  SEED_SAMPLE_DATA : {}", self.seed_sample_data);
    }
}
