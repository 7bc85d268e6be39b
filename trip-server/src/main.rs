use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trip_server::cache::{CacheConfig, CachedOsrmClient};
use trip_server::directions::{DirectionsClient, DirectionsConfig};
use trip_server::osrm::{OsrmClient, OsrmConfig};
use trip_server::planner::PlannerConfig;
use trip_server::stops::{StopIndex, load_stops};
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // OSRM routing client (public demo instance by default)
    let mut osrm_config = OsrmConfig::new();
    if let Ok(base_url) = std::env::var("OSRM_BASE_URL") {
        osrm_config = osrm_config.with_base_url(base_url);
    }
    let osrm_client = OsrmClient::new(osrm_config).expect("Failed to create OSRM client");
    let cached_osrm = CachedOsrmClient::new(osrm_client, &CacheConfig::default());

    // Optional Google Directions client for real transit routing
    let directions = match std::env::var("GOOGLE_MAPS_API_KEY") {
        Ok(key) if !key.is_empty() => {
            info!("directions service configured; transit segments will try it first");
            Some(
                DirectionsClient::new(DirectionsConfig::new(key))
                    .expect("Failed to create directions client"),
            )
        }
        _ => {
            info!("no GOOGLE_MAPS_API_KEY; transit segments use the stop-proxy approximation");
            None
        }
    };

    // Stop dataset: loaded once, immutable for the process lifetime
    let stops = match std::env::var("STOPS_PATH") {
        Ok(path) => match load_stops(&path) {
            Ok(stops) => {
                info!(count = stops.len(), %path, "loaded stop dataset");
                StopIndex::new(stops)
            }
            Err(e) => {
                warn!(%path, error = %e, "failed to load stops; transit segments will degrade");
                StopIndex::default()
            }
        },
        Err(_) => {
            warn!("STOPS_PATH not set; transit segments will degrade");
            StopIndex::default()
        }
    };

    let state = AppState::new(cached_osrm, stops, directions, PlannerConfig::default());
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

    info!(%addr, "trip planner listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
