use std::process;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bus_server::config::ServerConfig;
use bus_server::dataset::DatasetSource;
use bus_server::network::SnapshotStore;
use bus_server::planner::PlannerConfig;
use bus_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bus_server=info,tower_http=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            process::exit(1);
        }
    };

    // Load the network (fail fast if unavailable)
    let source = DatasetSource::from_path(&config.data_path);
    let network = match SnapshotStore::open(source).await {
        Ok(network) => network,
        Err(e) => {
            error!(error = %e, "failed to load network");
            process::exit(1);
        }
    };

    let state = AppState::new(network, PlannerConfig::default(), &config.plan_cache);

    // Spawn background task to reload the dataset periodically
    if let Some(period) = config.reload_interval {
        let state = state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match state.network.reload().await {
                    Ok(snapshot) => {
                        state.plans.invalidate_all();
                        info!(generation = snapshot.generation(), "periodic reload");
                    }
                    Err(e) => warn!(error = %e, "periodic reload failed"),
                }
            }
        });
    }

    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            process::exit(1);
        }
    };

    info!(addr = %config.bind_addr, "bus trip planner listening");
    info!("GET  /api/routes?from&to&time       - Plan a trip");
    info!("GET  /api/buses/upcoming?from&to    - Upcoming buses");
    info!("GET  /api/path/local?from&to        - Local shortest path");
    info!("POST /admin/reload                  - Reload the dataset");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        process::exit(1);
    }
}
