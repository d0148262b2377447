//! Naval operations planning HTTP server.
//!
//! Entry point for the REST API: loads provider configuration, sets up the
//! router, and serves requests.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `NAVOPS_CONFIG`: Optional TOML config file for provider endpoints
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use navops::config::PlannerConfig;
use navops::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting naval operations planning server");

    let config = PlannerConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    info!(
        "Provider endpoints loaded (pace {} ms, timeout {} s)",
        config.pace_ms, config.request_timeout_s
    );

    let state = AppState::new(config);
    let app = create_router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
