//! OSRM routing client.
//!
//! HTTP client for the OSRM `route` service, used for point-to-point
//! driving and walking routes.
//!
//! Key characteristics of OSRM:
//! - Coordinates on the wire are **longitude-first**; this module owns
//!   the conversion to the latitude-first internal model, and the
//!   conversion never leaks to callers
//! - Distances are metres and durations seconds; callers receive
//!   kilometres and minutes
//! - A `200 OK` response can still carry a non-`Ok` status code in the
//!   body, which is treated as a routing failure

mod client;
mod error;
mod types;

pub use client::{OsrmClient, OsrmConfig, Profile, RoutedPath};
pub use error::RoutingError;
pub use types::{OsrmGeometry, OsrmRoute, OsrmRouteResponse};
