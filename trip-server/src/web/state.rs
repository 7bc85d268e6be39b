//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedOsrmClient;
use crate::directions::DirectionsClient;
use crate::planner::PlannerConfig;
use crate::stops::StopIndex;

/// Shared application state.
///
/// Everything here is read-only after startup; concurrent requests
/// share it without synchronization.
#[derive(Clone)]
pub struct AppState {
    /// Cached OSRM routing client
    pub osrm: Arc<CachedOsrmClient>,

    /// Immutable stop dataset snapshot
    pub stops: Arc<StopIndex>,

    /// Optional directions service for real transit routing
    pub directions: Option<Arc<DirectionsClient>>,

    /// Planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        osrm: CachedOsrmClient,
        stops: StopIndex,
        directions: Option<DirectionsClient>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            osrm: Arc::new(osrm),
            stops: Arc::new(stops),
            directions: directions.map(Arc::new),
            config: Arc::new(config),
        }
    }
}
