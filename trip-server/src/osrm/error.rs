//! Routing client error types.

/// Errors from the OSRM HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON for the expected shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Service returned an error status code
    #[error("routing API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Service answered but could not produce a route
    #[error("no route found (code {code})")]
    NoRoute { code: String },

    /// Client is saturated and the request slot was never granted
    #[error("request slot unavailable: {0}")]
    Saturated(&'static str),
}
