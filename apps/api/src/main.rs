mod config;
mod errors;
mod models;
mod pipeline;
mod routes;
mod scoring;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::pipeline::polling::PollPolicy;
use crate::pipeline::service::{AnalysisService, ServiceSettings};
use crate::pipeline::{seed, sweeper};
use crate::routes::build_router;
use crate::scoring::synthesis::SyntheticAnalysisEngine;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{} (demo mode)", env!("CARGO_PKG_VERSION"));

    // Analysis engine (synthetic results; failure rate from SIMULATED_FAILURE_RATE)
    let engine = Arc::new(match config.analysis_seed {
        Some(seed) => {
            info!(seed, "synthetic engine seeded");
            SyntheticAnalysisEngine::with_seed(seed, config.failure_rate)
        }
        None => SyntheticAnalysisEngine::new(config.failure_rate),
    });
    let settings = ServiceSettings::from_config(&config);
    info!(
        processing_delay_ms = settings.processing_delay.as_millis() as u64,
        simulated_latency = config.simulated_latency,
        failure_rate = config.failure_rate,
        "analysis service configured"
    );
    let service = AnalysisService::new(engine, settings);

    if config.seed_demo_data {
        service
            .seed(seed::demo_resumes(), seed::demo_job_profiles())
            .await;
    }

    // Ledger housekeeping runs for the life of the process
    let _sweeper = sweeper::spawn(service.clone(), config.sweep_interval);

    let state = AppState {
        service,
        poll: PollPolicy::from_config(&config),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
