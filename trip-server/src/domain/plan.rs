//! Assembled trip plan types.

use super::{Coordinate, Destination, RouteSegment};

/// Nearest-stop information for one end of a transit segment.
#[derive(Debug, Clone)]
pub struct NearestStopInfo {
    /// Stop name from the dataset.
    pub name: String,

    /// Stop position.
    pub position: Coordinate,

    /// Walking distance from the query point to the stop, in km.
    pub distance_km: f64,
}

/// Descriptive record for one transit segment.
///
/// Produced alongside the segment geometry so the caller can render
/// which stops to use and link out to a timetable lookup.
#[derive(Debug, Clone)]
pub struct TransitDetail {
    /// Transit line name, when known from the directions service.
    pub line: Option<String>,

    /// Number of stops ridden, when known from the directions service.
    pub num_stops: Option<u32>,

    /// Boarding stop name.
    pub departure_stop: String,

    /// Alighting stop name.
    pub arrival_stop: String,

    /// Walking distance to the boarding stop, in km. Unknown when the
    /// segment came from the directions service.
    pub walk_to_stop_km: Option<f64>,

    /// Bus-proxy leg distance, in km.
    pub bus_km: Option<f64>,

    /// Walking distance from the alighting stop, in km.
    pub walk_from_stop_km: Option<f64>,

    /// Deep link to an external timetable lookup for this stop pair.
    /// Informational only; never fetched by the server.
    pub timetable_url: Option<String>,
}

/// A complete assembled trip.
///
/// Built fresh per request and discarded after the response; nothing
/// here is persisted.
#[derive(Debug, Clone)]
pub struct TripPlan {
    /// Destinations in visiting order.
    pub ordered_destinations: Vec<Destination>,

    /// One segment per consecutive pair of visiting points, in order.
    pub segments: Vec<RouteSegment>,

    /// Transit records aligned to transit segments, in segment order.
    pub transit_details: Vec<TransitDetail>,

    /// Nearest-stop records for the first transit segment, when present.
    pub first_segment_stops: Option<(NearestStopInfo, NearestStopInfo)>,
}

impl TripPlan {
    /// Total trip length in kilometres, summed over all segments.
    pub fn total_distance_km(&self) -> f64 {
        self.segments.iter().map(|s| s.distance_km).sum()
    }

    /// Total estimated duration in minutes, summed over all segments.
    pub fn total_duration_min(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_min).sum()
    }

    /// The full route geometry: all segment geometries concatenated in
    /// visiting order.
    pub fn route(&self) -> Vec<Coordinate> {
        self.segments
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .collect()
    }

    /// True if every segment was routed by an external service.
    pub fn fully_routed(&self) -> bool {
        self.segments.iter().all(|s| !s.status.is_estimated())
    }
}
