//! Wire types for the Google Directions API.
//!
//! Only the fields the transit composer consumes are modelled: route
//! overview polyline, leg distance/duration, and step-level transit
//! details.

use serde::Deserialize;

/// Top-level directions response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// "OK", "ZERO_RESULTS", "REQUEST_DENIED", ...
    pub status: String,

    #[serde(default)]
    pub routes: Vec<Route>,
}

/// One route alternative.
#[derive(Debug, Deserialize)]
pub struct Route {
    pub overview_polyline: OverviewPolyline,

    #[serde(default)]
    pub legs: Vec<Leg>,
}

/// Encoded route geometry.
#[derive(Debug, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

/// One leg of a route.
#[derive(Debug, Deserialize)]
pub struct Leg {
    pub distance: TextValue,
    pub duration: TextValue,

    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A metric with both display text and a numeric value
/// (metres for distances, seconds for durations).
#[derive(Debug, Deserialize)]
pub struct TextValue {
    pub value: f64,
}

/// One step within a leg.
#[derive(Debug, Deserialize)]
pub struct Step {
    pub travel_mode: String,

    #[serde(default)]
    pub transit_details: Option<TransitDetails>,
}

/// Transit metadata for a TRANSIT step.
#[derive(Debug, Deserialize)]
pub struct TransitDetails {
    #[serde(default)]
    pub line: Option<TransitLine>,

    #[serde(default)]
    pub departure_stop: Option<NamedStop>,

    #[serde(default)]
    pub arrival_stop: Option<NamedStop>,

    #[serde(default)]
    pub num_stops: Option<u32>,
}

/// A transit line reference.
#[derive(Debug, Deserialize)]
pub struct TransitLine {
    #[serde(default)]
    pub short_name: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

/// A named transit stop.
#[derive(Debug, Deserialize)]
pub struct NamedStop {
    pub name: String,
}
