//! Caching layer for OSRM responses.
//!
//! Consecutive planning requests frequently repeat the same
//! point-to-point queries (popular destinations, re-planning after a
//! swipe). Successful routes are cached with coordinates quantized to
//! the 1e-5 degree precision of the wire format, which bounds cache
//! cardinality without losing meaningful resolution.
//!
//! Failures are never cached; a transient upstream error should not
//! poison later requests.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::Coordinate;
use crate::osrm::{OsrmClient, Profile, RoutedPath, RoutingError};
use crate::planner::PathSource;

/// A coordinate quantized to 1e-5 degrees (microdegree-scale grid).
type GridPoint = (i64, i64);

/// Cache key for routed paths.
type RouteKey = (Profile, GridPoint, GridPoint);

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached routes.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 2000,
        }
    }
}

/// Quantize a coordinate to the cache grid.
fn grid_point(c: Coordinate) -> GridPoint {
    (
        (c.lat() * 1e5).round() as i64,
        (c.lon() * 1e5).round() as i64,
    )
}

/// OSRM client with response caching.
///
/// Wraps an `OsrmClient` and caches successful routes.
pub struct CachedOsrmClient {
    client: OsrmClient,
    routes: MokaCache<RouteKey, Arc<RoutedPath>>,
}

impl CachedOsrmClient {
    /// Create a new cached client.
    pub fn new(client: OsrmClient, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, routes }
    }

    /// Route between two points, using the cache when possible.
    pub async fn route(
        &self,
        profile: Profile,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<RoutedPath, RoutingError> {
        let key = (profile, grid_point(from), grid_point(to));

        if let Some(cached) = self.routes.get(&key).await {
            debug!(%profile, "route cache hit");
            return Ok((*cached).clone());
        }

        let path = self.client.route(profile, from, to).await?;
        self.routes.insert(key, Arc::new(path.clone())).await;

        Ok(path)
    }

    /// Number of cached routes (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Drop all cached routes.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}

impl PathSource for CachedOsrmClient {
    async fn find_path(
        &self,
        profile: Profile,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<RoutedPath, RoutingError> {
        self.route(profile, from, to).await
    }
}
