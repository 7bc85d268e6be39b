//! Domain types for the trip planner.
//!
//! This module contains the core domain model types that represent
//! validated geographic data. Coordinates enforce their range invariants
//! at construction time, so code that receives these types can trust
//! their validity.

mod coordinate;
mod destination;
mod plan;
mod segment;
mod stop;

pub use coordinate::{Coordinate, InvalidCoordinate, haversine_km};
pub use destination::Destination;
pub use plan::{NearestStopInfo, TransitDetail, TripPlan};
pub use segment::{LegMode, RouteMode, RouteSegment, SourceStatus};
pub use stop::Stop;
