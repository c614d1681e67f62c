mod agent;
mod config_manager;
mod error;
mod handlers;
mod history;
mod routes;
mod session;
mod state;
mod translate;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config_manager::utils::{candidate_config_paths, load_first_config};
use config_manager::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lingua_bridge=debug,tower_http=debug")),
        )
        .init();

    let config_paths = candidate_config_paths();
    let config = match load_first_config(&config_paths) {
        Some((config, path)) => {
            info!("Loaded configuration from: {}", path);
            config
        }
        None => {
            warn!(
                "No configuration file found (tried {:?}), using defaults",
                config_paths
            );
            Config::default()
        }
    };

    let app_state = AppState::new(config.clone())?;
    app_state.spawn_session_reaper();

    let app = routes::create_routes(app_state).layer(CorsLayer::permissive());

    let host: std::net::IpAddr = config.system_config.host.parse()?;
    let addr = SocketAddr::from((host, config.system_config.port));
    info!(
        "Starting translator on {} (provider: {})",
        addr, config.translator_config.llm_provider
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
