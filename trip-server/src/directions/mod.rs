//! Google Directions client.
//!
//! Optional enhancement path for transit segments: when an API key is
//! configured, transit legs are routed against the Directions API and
//! the returned overview polyline is decoded into the segment geometry.
//! Without a key, or on any failure, the transit composer falls back to
//! its stop-proxy approximation.

mod client;
mod error;
mod types;

pub use client::{DirectionsClient, DirectionsConfig, TransitRoute, TransitStep};
pub use error::DirectionsError;
pub use types::{DirectionsResponse, Leg, Route, Step, TextValue, TransitDetails};
