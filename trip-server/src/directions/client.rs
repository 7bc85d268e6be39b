//! Google Directions HTTP client.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::domain::Coordinate;
use crate::polyline;

use super::error::DirectionsError;
use super::types::DirectionsResponse;

/// Default base URL for the Directions API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Configuration for the Directions client.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Maximum concurrent requests.
    pub max_concurrent: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
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

/// One transit step extracted from a directions response.
#[derive(Debug, Clone)]
pub struct TransitStep {
    /// Line short name or full name.
    pub line: Option<String>,

    /// Boarding stop name.
    pub departure_stop: Option<String>,

    /// Alighting stop name.
    pub arrival_stop: Option<String>,

    /// Number of stops ridden.
    pub num_stops: Option<u32>,
}

/// A transit route with decoded geometry and step metadata.
#[derive(Debug, Clone)]
pub struct TransitRoute {
    /// Decoded overview geometry, latitude-first.
    pub points: Vec<Coordinate>,

    /// Route length in kilometres.
    pub distance_km: f64,

    /// Estimated travel time in minutes.
    pub duration_min: f64,

    /// TRANSIT steps in travel order.
    pub steps: Vec<TransitStep>,
}

/// Client for the Google Directions API.
///
/// Concurrent requests are bounded by a semaphore so a plan with many
/// transit segments cannot stampede the API.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl DirectionsClient {
    /// Create a new Directions client.
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Request a bus transit route between two points.
    ///
    /// Returns the first route alternative with its overview polyline
    /// decoded. A well-formed response with a malformed polyline is a
    /// `Polyline` error, which callers treat like any other upstream
    /// failure.
    pub async fn transit_route(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<TransitRoute, DirectionsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| DirectionsError::Saturated("semaphore closed"))?;

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("origin", from.to_string()),
                ("destination", to.to_string()),
                ("mode", "transit".to_string()),
                ("transit_mode", "bus".to_string()),
                ("departure_time", "now".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectionsError::Status {
                status: status.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
                message: e.to_string(),
            })?;

        if parsed.status != "OK" {
            return Err(DirectionsError::Status {
                status: parsed.status,
            });
        }

        let route = parsed.routes.into_iter().next().ok_or(DirectionsError::NoRoute)?;
        let leg = route.legs.first().ok_or(DirectionsError::NoRoute)?;

        let points = polyline::decode(&route.overview_polyline.points)?;

        let steps = leg
            .steps
            .iter()
            .filter(|s| s.travel_mode == "TRANSIT")
            .map(|s| {
                let details = s.transit_details.as_ref();
                TransitStep {
                    line: details.and_then(|d| {
                        d.line
                            .as_ref()
                            .and_then(|l| l.short_name.clone().or_else(|| l.name.clone()))
                    }),
                    departure_stop: details
                        .and_then(|d| d.departure_stop.as_ref().map(|s| s.name.clone())),
                    arrival_stop: details
                        .and_then(|d| d.arrival_stop.as_ref().map(|s| s.name.clone())),
                    num_stops: details.and_then(|d| d.num_stops),
                }
            })
            .collect();

        Ok(TransitRoute {
            points,
            distance_km: leg.distance.value / 1000.0,
            duration_min: leg.duration.value / 60.0,
            steps,
        })
    }
}
