//! Directions client error types.

use crate::polyline::PolylineError;

/// Errors from the Google Directions client.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON for the expected shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// API answered with a non-OK status string
    #[error("directions API status {status}")]
    Status { status: String },

    /// API answered OK but without a usable route
    #[error("directions response contained no route")]
    NoRoute,

    /// The overview polyline could not be decoded
    #[error("malformed overview polyline: {0}")]
    Polyline(#[from] PolylineError),

    /// Client is saturated and the request slot was never granted
    #[error("request slot unavailable: {0}")]
    Saturated(&'static str),
}
