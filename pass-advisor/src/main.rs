use pass_advisor::cache::OccupancyCache;
use pass_advisor::config::ServerConfig;
use pass_advisor::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    info!(
        network = %config.files.network.display(),
        trains = %config.files.trains.display(),
        scan_mode = ?config.advisor.scan_mode,
        tie_break = ?config.advisor.tie_break,
        "starting pass advisor"
    );

    let occupancy = OccupancyCache::new(&config.cache);
    let state = AppState::new(config.files, occupancy, config.advisor);
    let app = create_router(state);

    let addr = config.addr;
    info!("listening on http://{addr}");
    info!("  GET  /health        - Health check");
    info!("  GET  /api/optimize  - Advise on the configured files");
    info!("  POST /api/optimize  - Advise on an inline network and roster");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
