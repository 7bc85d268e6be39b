//! Data transfer objects for web requests and responses.
//!
//! The wire model is explicit about coordinate order: every coordinate
//! is a `{lat, lon}` object, never a bare array, so callers cannot mix
//! up the ordering the way positional pairs invite.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Coordinate, Destination, InvalidCoordinate, NearestStopInfo, RouteSegment, SourceStatus,
    TransitDetail, TripPlan,
};

/// A coordinate on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoordinateDto {
    pub lat: f64,
    pub lon: f64,
}

impl CoordinateDto {
    /// Validate into a domain coordinate.
    pub fn to_domain(self) -> Result<Coordinate, InvalidCoordinate> {
        Coordinate::new(self.lat, self.lon)
    }

    /// Create from a domain coordinate.
    pub fn from_domain(c: Coordinate) -> Self {
        Self {
            lat: c.lat(),
            lon: c.lon(),
        }
    }
}

/// A destination in a planning request.
#[derive(Debug, Deserialize)]
pub struct DestinationDto {
    /// Caller-supplied identifier, echoed back in the response.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Destination position.
    #[serde(flatten)]
    pub position: CoordinateDto,
}

impl DestinationDto {
    /// Validate into a domain destination.
    pub fn to_domain(self) -> Result<Destination, InvalidCoordinate> {
        let position = self.position.to_domain()?;
        Ok(Destination::new(
            self.id,
            self.name.unwrap_or_default(),
            position,
        ))
    }
}

/// Request to plan a trip.
#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    /// Starting point.
    pub origin: CoordinateDto,

    /// Destinations to visit, in any order.
    pub destinations: Vec<DestinationDto>,

    /// "driving" or "transit".
    pub mode: String,
}

/// One segment in a plan response.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    /// "walk", "drive", or "transit"
    pub mode: &'static str,

    /// Segment geometry in travel order.
    pub points: Vec<CoordinateDto>,

    /// Segment length in kilometres.
    pub distance_km: f64,

    /// Estimated duration in minutes.
    pub duration_min: f64,

    /// "routed", "fallback", or "degraded" — whether the geometry came
    /// from the routing service or is an estimate.
    pub status: &'static str,
}

impl SegmentResult {
    /// Create from a domain segment.
    pub fn from_segment(segment: &RouteSegment) -> Self {
        Self {
            mode: match segment.mode {
                crate::domain::LegMode::Walk => "walk",
                crate::domain::LegMode::Drive => "drive",
                crate::domain::LegMode::Transit => "transit",
            },
            points: segment
                .points
                .iter()
                .map(|p| CoordinateDto::from_domain(*p))
                .collect(),
            distance_km: segment.distance_km,
            duration_min: segment.duration_min,
            status: match segment.status {
                SourceStatus::Routed => "routed",
                SourceStatus::Fallback => "fallback",
                SourceStatus::Degraded => "degraded",
            },
        }
    }
}

/// A transit descriptive record.
#[derive(Debug, Serialize)]
pub struct TransitDetailResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_stops: Option<u32>,

    pub departure_stop: String,
    pub arrival_stop: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub walk_to_stop_km: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus_km: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub walk_from_stop_km: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timetable_url: Option<String>,
}

impl TransitDetailResult {
    /// Create from a domain transit detail.
    pub fn from_detail(detail: &TransitDetail) -> Self {
        Self {
            line: detail.line.clone(),
            num_stops: detail.num_stops,
            departure_stop: detail.departure_stop.clone(),
            arrival_stop: detail.arrival_stop.clone(),
            walk_to_stop_km: detail.walk_to_stop_km,
            bus_km: detail.bus_km,
            walk_from_stop_km: detail.walk_from_stop_km,
            timetable_url: detail.timetable_url.clone(),
        }
    }
}

/// Nearest-stop info for one endpoint.
#[derive(Debug, Serialize)]
pub struct StopInfoResult {
    pub name: String,
    pub position: CoordinateDto,
    pub distance_km: f64,
}

impl StopInfoResult {
    /// Create from domain nearest-stop info.
    pub fn from_info(info: &NearestStopInfo) -> Self {
        Self {
            name: info.name.clone(),
            position: CoordinateDto::from_domain(info.position),
            distance_km: info.distance_km,
        }
    }
}

/// Nearest-stop pair for the first transit segment.
#[derive(Debug, Serialize)]
pub struct StopPairResult {
    pub origin: StopInfoResult,
    pub destination: StopInfoResult,
}

/// Response to a plan request.
#[derive(Debug, Serialize)]
pub struct PlanTripResponse {
    /// Destination ids in visiting order.
    pub ordered_destinations: Vec<String>,

    /// Full route geometry, all segments concatenated.
    pub route: Vec<CoordinateDto>,

    /// Per-segment breakdown.
    pub segments: Vec<SegmentResult>,

    /// Total trip length in kilometres.
    pub total_distance_km: f64,

    /// Total estimated duration in minutes.
    pub total_duration_min: f64,

    /// Transit records aligned to transit segments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transit_details: Vec<TransitDetailResult>,

    /// Nearest-stop records for the first transit segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops: Option<StopPairResult>,
}

impl PlanTripResponse {
    /// Create from an assembled trip plan.
    pub fn from_plan(plan: &TripPlan) -> Self {
        Self {
            ordered_destinations: plan
                .ordered_destinations
                .iter()
                .map(|d| d.id.clone())
                .collect(),
            route: plan
                .route()
                .into_iter()
                .map(CoordinateDto::from_domain)
                .collect(),
            segments: plan.segments.iter().map(SegmentResult::from_segment).collect(),
            total_distance_km: plan.total_distance_km(),
            total_duration_min: plan.total_duration_min(),
            transit_details: plan
                .transit_details
                .iter()
                .map(TransitDetailResult::from_detail)
                .collect(),
            stops: plan.first_segment_stops.as_ref().map(|(origin, dest)| {
                StopPairResult {
                    origin: StopInfoResult::from_info(origin),
                    destination: StopInfoResult::from_info(dest),
                }
            }),
        }
    }
}

/// Query parameters for the nearest-stop endpoint.
#[derive(Debug, Deserialize)]
pub struct NearestStopRequest {
    pub lat: f64,
    pub lon: f64,

    /// How many stops to return, closest first. Defaults to 1 and is
    /// capped server-side.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Response for the nearest-stop endpoint.
#[derive(Debug, Serialize)]
pub struct NearestStopResponse {
    /// Stops closest to the query point, nearest first.
    pub stops: Vec<StopInfoResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
