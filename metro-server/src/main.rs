use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metro_server::config::ServerConfig;
use metro_server::loader::load_dir;
use metro_server::planner::{RouteOverrides, RoutingConfig};
use metro_server::service::MetroService;
use metro_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let routing = RoutingConfig::default();

    // Reference data is required; refuse to start without it
    info!(dir = %config.data_dir.display(), "loading reference data");
    let data = match load_dir(&config.data_dir, routing.default_speed_kmh) {
        Ok(data) => data,
        Err(e) => {
            error!(error = %e, "failed to load reference data");
            return ExitCode::FAILURE;
        }
    };

    let metro = MetroService::new(data, RouteOverrides::builtin(), routing);
    let app = create_router(AppState::new(metro), config.allowed_origin.clone());

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(
        addr = %config.bind_addr,
        origin = ?config.allowed_origin,
        "metro planner listening"
    );
    info!("  GET    /health");
    info!("  GET    /api/subway/lines");
    info!("  GET    /api/subway/stations");
    info!("  POST   /api/subway/line");
    info!("  DELETE /api/subway/line/:line_id");
    info!("  GET    /api/subway/path/shortest");
    info!("  GET    /api/subway/path/least-transfer");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
