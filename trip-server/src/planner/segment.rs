//! Single-segment routing with fallback.

use std::future::Future;

use tracing::warn;

use crate::domain::{Coordinate, LegMode, RouteSegment, SourceStatus};
use crate::osrm::{Profile, RoutedPath, RoutingError};

use super::config::PlannerConfig;

/// Trait for providing point-to-point paths.
///
/// This abstraction allows the planner to be tested with mock data and
/// keeps it oblivious to caching.
pub trait PathSource: Sync {
    /// Find a path between two points with the given profile.
    fn find_path(
        &self,
        profile: Profile,
        from: Coordinate,
        to: Coordinate,
    ) -> impl Future<Output = Result<RoutedPath, RoutingError>> + Send;
}

/// Point-to-point router that absorbs upstream failures.
///
/// Every call produces a segment: a routed one when the path source
/// succeeds, otherwise a straight line between the two points with an
/// estimated duration. This type never returns an error to its caller.
pub struct SegmentRouter<'a, P: PathSource> {
    source: &'a P,
    config: &'a PlannerConfig,
}

impl<'a, P: PathSource> SegmentRouter<'a, P> {
    /// Create a new segment router.
    pub fn new(source: &'a P, config: &'a PlannerConfig) -> Self {
        Self { source, config }
    }

    /// Route a single leg.
    ///
    /// Any upstream failure (network error, timeout, bad status,
    /// malformed payload) is logged and absorbed into a straight-line
    /// fallback with `status = Fallback`.
    pub async fn route(&self, mode: LegMode, from: Coordinate, to: Coordinate) -> RouteSegment {
        let profile = match mode {
            LegMode::Walk => Profile::Foot,
            LegMode::Drive | LegMode::Transit => Profile::Driving,
        };

        match self.source.find_path(profile, from, to).await {
            Ok(path) => RouteSegment {
                mode,
                points: path.points,
                distance_km: path.distance_km,
                duration_min: path.duration_min,
                status: SourceStatus::Routed,
            },
            Err(e) => {
                warn!(%profile, %from, %to, error = %e, "routing failed; using straight-line fallback");
                RouteSegment::straight_line(
                    mode,
                    from,
                    to,
                    self.config.fallback_min_per_km(mode),
                    SourceStatus::Fallback,
                )
            }
        }
    }
}
