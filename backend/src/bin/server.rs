//! Jornada HTTP Server Binary
//!
//! Main entry point for the schedule engine REST API. It loads the
//! configuration, initializes the repository, sets up the HTTP router and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Empty in-memory repository on 0.0.0.0:8080
//! cargo run --bin jornada-server
//!
//! # Preloaded school data
//! JORNADA_SEED_PATH=seed.json cargo run --bin jornada-server
//! ```
//!
//! # Environment Variables
//!
//! - `JORNADA_CONFIG`: Path to a `jornada.toml` file
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: Repository backend (default: local)
//! - `JORNADA_SEED_PATH`: JSON seed loaded into the repository at startup
//! - `SCHOOL_DAY_OPENS_AT` / `SCHOOL_DAY_CLOSES_AT`: School-day window (HH:MM)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use jornada_backend::config::AppConfig;
use jornada_backend::db;
use jornada_backend::http::{create_router, AppState};
use jornada_backend::models::time::format_clock_time;
use jornada_backend::services::EngineContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Jornada HTTP Server");

    let config = AppConfig::load()?;
    let school_day = config.school_day_window()?;
    info!(
        "School day window {} - {}",
        format_clock_time(school_day.opens_at),
        format_clock_time(school_day.closes_at)
    );

    db::init_repository(&config).await?;
    let repository = Arc::clone(db::get_repository()?);
    info!("Repository initialized successfully");

    let engine = EngineContext::with_system_clock(repository).with_school_day(school_day);
    let app = create_router(AppState::new(engine));

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
