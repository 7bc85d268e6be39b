//! OSRM HTTP client.
//!
//! Provides async point-to-point routing against an OSRM instance and
//! conversion of wire responses to the internal coordinate model.

use std::fmt;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::domain::Coordinate;

use super::error::RoutingError;
use super::types::OsrmRouteResponse;

/// Default base URL: the public OSRM demo instance.
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Default request timeout in seconds. Kept well under the overall
/// request budget so a stalled upstream turns into a fallback quickly.
const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// OSRM routing profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Car routing; also serves as the bus-route stand-in.
    Driving,
    /// Pedestrian routing.
    Foot,
}

impl Profile {
    /// Path component of this profile on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Driving => "driving",
            Profile::Foot => "foot",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successfully routed path, in internal units.
#[derive(Debug, Clone)]
pub struct RoutedPath {
    /// Geometry, latitude-first.
    pub points: Vec<Coordinate>,

    /// Path length in kilometres.
    pub distance_km: f64,

    /// Estimated travel time in minutes.
    pub duration_min: f64,
}

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the OSRM instance.
    pub base_url: String,
    /// Maximum concurrent requests.
    pub max_concurrent: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl OsrmConfig {
    /// Create a config pointing at the default public instance.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (self-hosted instance, or testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// OSRM route service client.
///
/// Uses a semaphore to bound concurrent requests so a plan with many
/// segments cannot stampede the upstream instance.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl OsrmClient {
    /// Create a new OSRM client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Route between two points with the given profile.
    ///
    /// The wire format is longitude-first; this method owns that
    /// conversion in both directions.
    pub async fn route(
        &self,
        profile: Profile,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<RoutedPath, RoutingError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RoutingError::Saturated("semaphore closed"))?;

        let url = format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.base_url,
            profile.as_str(),
            from.lon(),
            from.lat(),
            to.lon(),
            to.lat(),
        );

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: OsrmRouteResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Json {
                message: e.to_string(),
            })?;

        if parsed.code != "Ok" {
            let code = match parsed.message {
                Some(message) => format!("{} ({message})", parsed.code),
                None => parsed.code,
            };
            return Err(RoutingError::NoRoute { code });
        }

        let route = parsed
            .routes
            .into_iter()
            .next()
            .ok_or(RoutingError::NoRoute {
                code: "Ok (empty routes)".to_string(),
            })?;

        let mut points = Vec::with_capacity(route.geometry.coordinates.len());
        for [lon, lat] in route.geometry.coordinates {
            let point = Coordinate::new(lat, lon).map_err(|e| RoutingError::Json {
                message: format!("geometry contains invalid coordinate: {e}"),
            })?;
            points.push(point);
        }

        Ok(RoutedPath {
            points,
            distance_km: route.distance / 1000.0,
            duration_min: route.duration / 60.0,
        })
    }
}
