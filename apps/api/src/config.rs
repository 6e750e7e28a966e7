use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub processing_delay: Duration,
    pub simulated_latency: bool,
    pub latency_jitter: Duration,
    pub failure_rate: f64,
    /// Fixes the synthetic engine's RNG for reproducible demos.
    pub analysis_seed: Option<u64>,
    pub job_ttl: Duration,
    pub sweep_interval: Duration,
    pub seed_demo_data: bool,
    pub poll_interval: Duration,
    pub poll_max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let failure_rate: f64 = env_or("SIMULATED_FAILURE_RATE", 0.0)?;
        if !(0.0..=1.0).contains(&failure_rate) {
            anyhow::bail!("SIMULATED_FAILURE_RATE must be within [0, 1], got {failure_rate}");
        }

        Ok(Config {
            port: env_or("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            processing_delay: Duration::from_millis(env_or("PROCESSING_DELAY_MS", 3000)?),
            simulated_latency: env_or("SIMULATED_LATENCY", true)?,
            latency_jitter: Duration::from_millis(env_or("LATENCY_JITTER_MS", 0)?),
            failure_rate,
            analysis_seed: env_opt("ANALYSIS_SEED")?,
            job_ttl: Duration::from_secs(env_or("JOB_TTL_SECS", 3600)?),
            sweep_interval: Duration::from_secs(env_or("SWEEP_INTERVAL_SECS", 60)?),
            seed_demo_data: env_or("SEED_DEMO_DATA", true)?,
            poll_interval: Duration::from_millis(env_or("POLL_INTERVAL_MS", 1000)?),
            poll_max_attempts: env_or("POLL_MAX_ATTEMPTS", 30)?,
        })
    }
}

/// Reads `key` and parses it, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Like `env_or`, but unset means `None`.
fn env_opt<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    std::env::var(key)
        .ok()
        .map(|raw| {
            raw.trim().parse::<T>().with_context(|| {
                format!("Environment variable '{key}' has an invalid value '{raw}'")
            })
        })
        .transpose()
}
