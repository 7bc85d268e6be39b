//! Wire types for the OSRM route service.
//!
//! Field names and units follow the OSRM HTTP API: GeoJSON geometry with
//! longitude-first coordinate pairs, distance in metres, duration in
//! seconds.

use serde::Deserialize;

/// Top-level response from `/route/v1/{profile}/...`.
#[derive(Debug, Deserialize)]
pub struct OsrmRouteResponse {
    /// "Ok" on success; anything else is a routing failure even with
    /// an HTTP 200.
    pub code: String,

    #[serde(default)]
    pub routes: Vec<OsrmRoute>,

    /// Human-readable failure detail, present on error codes.
    #[serde(default)]
    pub message: Option<String>,
}

/// One route alternative.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    pub geometry: OsrmGeometry,

    /// Route length in metres.
    pub distance: f64,

    /// Estimated travel time in seconds.
    pub duration: f64,
}

/// GeoJSON LineString geometry: `[lon, lat]` pairs.
#[derive(Debug, Deserialize)]
pub struct OsrmGeometry {
    pub coordinates: Vec<[f64; 2]>,
}
