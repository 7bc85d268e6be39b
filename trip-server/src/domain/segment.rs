//! Route segment types.

use std::fmt;

use super::Coordinate;

/// Travel mode requested for a whole trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode {
    /// Drive directly between consecutive points.
    Driving,
    /// Approximate public transport via walk + bus-proxy + walk legs.
    Transit,
}

impl RouteMode {
    /// Parse a mode from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "driving" => Some(RouteMode::Driving),
            "transit" => Some(RouteMode::Transit),
            _ => None,
        }
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteMode::Driving => f.write_str("driving"),
            RouteMode::Transit => f.write_str("transit"),
        }
    }
}

/// Travel mode of a single leg within a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegMode {
    Walk,
    Drive,
    /// Driving geometry standing in for a bus route.
    Transit,
}

/// Where a segment's geometry and timings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    /// Geometry and timings from an external routing service.
    Routed,
    /// Upstream failed; straight-line geometry with estimated timings.
    Fallback,
    /// Transit approximation was impossible (no nearby stop); the
    /// segment is a straight-line estimate.
    Degraded,
}

impl SourceStatus {
    /// True if any part of this segment is estimated rather than routed.
    pub fn is_estimated(&self) -> bool {
        !matches!(self, SourceStatus::Routed)
    }
}

/// One leg of a multi-stop route between two consecutive visiting points.
#[derive(Debug, Clone)]
pub struct RouteSegment {
    /// Travel mode of this segment.
    pub mode: LegMode,

    /// Ordered geometry, latitude-first.
    pub points: Vec<Coordinate>,

    /// Segment length in kilometres.
    pub distance_km: f64,

    /// Estimated travel time in minutes.
    pub duration_min: f64,

    /// Whether the segment was routed or estimated.
    pub status: SourceStatus,
}

impl RouteSegment {
    /// Build a straight-line segment between two points with an
    /// estimated duration.
    pub fn straight_line(
        mode: LegMode,
        from: Coordinate,
        to: Coordinate,
        min_per_km: f64,
        status: SourceStatus,
    ) -> Self {
        let distance_km = super::haversine_km(from, to);
        Self {
            mode,
            points: vec![from, to],
            distance_km,
            duration_min: distance_km * min_per_km,
            status,
        }
    }

    /// Merge consecutive legs into one segment, concatenating geometry
    /// in order and summing distance and duration.
    ///
    /// The merged status is the worst of the legs: `Degraded` beats
    /// `Fallback` beats `Routed`.
    pub fn concat(mode: LegMode, legs: Vec<RouteSegment>) -> Self {
        let mut points = Vec::new();
        let mut distance_km = 0.0;
        let mut duration_min = 0.0;
        let mut status = SourceStatus::Routed;

        fn severity(s: SourceStatus) -> u8 {
            match s {
                SourceStatus::Routed => 0,
                SourceStatus::Fallback => 1,
                SourceStatus::Degraded => 2,
            }
        }

        for leg in legs {
            points.extend(leg.points);
            distance_km += leg.distance_km;
            duration_min += leg.duration_min;
            if severity(leg.status) > severity(status) {
                status = leg.status;
            }
        }

        Self {
            mode,
            points,
            distance_km,
            duration_min,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::haversine_km;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn mode_parse() {
        assert_eq!(RouteMode::parse("driving"), Some(RouteMode::Driving));
        assert_eq!(RouteMode::parse("transit"), Some(RouteMode::Transit));
        assert_eq!(RouteMode::parse("bus"), None);
        assert_eq!(RouteMode::parse(""), None);
    }

    #[test]
    fn straight_line_uses_haversine() {
        let a = coord(50.2091, 15.8327);
        let b = coord(50.0, 15.7);
        let seg = RouteSegment::straight_line(LegMode::Drive, a, b, 1.5, SourceStatus::Fallback);

        let expected = haversine_km(a, b);
        assert_eq!(seg.points, vec![a, b]);
        assert!((seg.distance_km - expected).abs() < 1e-9);
        assert!((seg.duration_min - expected * 1.5).abs() < 1e-9);
        assert_eq!(seg.status, SourceStatus::Fallback);
    }

    #[test]
    fn concat_sums_and_orders() {
        let a = coord(50.0, 15.0);
        let b = coord(50.1, 15.1);
        let c = coord(50.2, 15.2);

        let first = RouteSegment::straight_line(LegMode::Walk, a, b, 12.0, SourceStatus::Routed);
        let second = RouteSegment::straight_line(LegMode::Drive, b, c, 1.5, SourceStatus::Fallback);

        let total_km = first.distance_km + second.distance_km;
        let total_min = first.duration_min + second.duration_min;

        let merged = RouteSegment::concat(LegMode::Transit, vec![first, second]);

        assert_eq!(merged.points, vec![a, b, b, c]);
        assert!((merged.distance_km - total_km).abs() < 1e-9);
        assert!((merged.duration_min - total_min).abs() < 1e-9);
        assert_eq!(merged.status, SourceStatus::Fallback);
    }

    #[test]
    fn concat_degraded_wins() {
        let a = coord(50.0, 15.0);
        let b = coord(50.1, 15.1);

        let routed = RouteSegment::straight_line(LegMode::Walk, a, b, 12.0, SourceStatus::Routed);
        let degraded =
            RouteSegment::straight_line(LegMode::Drive, a, b, 1.5, SourceStatus::Degraded);

        let merged = RouteSegment::concat(LegMode::Transit, vec![routed, degraded]);
        assert_eq!(merged.status, SourceStatus::Degraded);
    }

    #[test]
    fn is_estimated() {
        assert!(!SourceStatus::Routed.is_estimated());
        assert!(SourceStatus::Fallback.is_estimated());
        assert!(SourceStatus::Degraded.is_estimated());
    }
}
