use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metro_server::config::{ConfigError, ServerConfig};
use metro_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;

    // Network data problems are fatal: there is nothing to plan over.
    let network_config = config.network_config()?;
    let network = network_config.build_network().map_err(ConfigError::from)?;
    let fare = network_config.fare()?;

    match &config.network_file {
        Some(path) => info!(path = %path.display(), "loaded network"),
        None => info!("using built-in Hyderabad sample network"),
    }
    info!(
        stops = network.stop_count(),
        connections = network.connection_count(),
        fare_per_km = fare.fare_per_km,
        "network ready"
    );

    let state = AppState::new(network, fare);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Metro Route Finder listening on http://{}", config.addr);
    info!("API Endpoints:");
    info!("  GET  /health          - Health check");
    info!("  GET  /api/stops       - List stops");
    info!("  GET  /route           - Plan a route");
    info!("  GET  /route/export    - Download route receipt");
    info!("  GET  /favorites       - Saved routes");
    info!("  POST /favorites       - Save a route");

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
