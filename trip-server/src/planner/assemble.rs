//! Trip assembly.

use futures::future::join_all;
use tracing::info;

use crate::directions::DirectionsClient;
use crate::domain::{Coordinate, Destination, LegMode, RouteMode, TripPlan};
use crate::stops::StopIndex;

use super::config::PlannerConfig;
use super::order::visit_order;
use super::segment::{PathSource, SegmentRouter};
use super::transit::{SegmentOutcome, TransitComposer};

/// Error from trip planning.
///
/// Only structural input problems are errors; every upstream failure is
/// absorbed into per-segment fallback estimates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The request contained no destinations
    #[error("cannot plan a trip with no destinations")]
    NoDestinations,
}

/// Top-level trip planner.
///
/// Borrows its collaborators for the duration of one request; nothing
/// is retained between requests.
pub struct RoutePlanner<'a, P: PathSource> {
    source: &'a P,
    stops: &'a StopIndex,
    directions: Option<&'a DirectionsClient>,
    config: &'a PlannerConfig,
}

impl<'a, P: PathSource> RoutePlanner<'a, P> {
    /// Create a new planner.
    pub fn new(
        source: &'a P,
        stops: &'a StopIndex,
        directions: Option<&'a DirectionsClient>,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            source,
            stops,
            directions,
            config,
        }
    }

    /// Plan a trip from `origin` through all `destinations`.
    ///
    /// Destinations are reordered with the nearest-neighbor heuristic,
    /// each consecutive pair becomes one segment, and segments are
    /// concatenated strictly in visiting order. Segment routing is
    /// dispatched concurrently; ordering is enforced at assembly time.
    pub async fn plan(
        &self,
        origin: Coordinate,
        destinations: Vec<Destination>,
        mode: RouteMode,
    ) -> Result<TripPlan, PlanError> {
        if destinations.is_empty() {
            return Err(PlanError::NoDestinations);
        }

        let ordered = visit_order(origin, destinations);

        let mut points = Vec::with_capacity(ordered.len() + 1);
        points.push(origin);
        points.extend(ordered.iter().map(|d| d.position));

        let router = SegmentRouter::new(self.source, self.config);
        let composer = TransitComposer::new(self.source, self.stops, self.directions, self.config);

        let outcomes: Vec<SegmentOutcome> = join_all(points.windows(2).map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            let router = &router;
            let composer = &composer;
            async move {
                match mode {
                    RouteMode::Driving => {
                        SegmentOutcome::plain(router.route(LegMode::Drive, from, to).await)
                    }
                    RouteMode::Transit => composer.compose(from, to).await,
                }
            }
        }))
        .await;

        let mut segments = Vec::with_capacity(outcomes.len());
        let mut transit_details = Vec::new();
        let mut first_segment_stops = None;

        for outcome in outcomes {
            if let Some(detail) = outcome.detail {
                transit_details.push(detail);
            }
            if first_segment_stops.is_none() {
                first_segment_stops = outcome.stops;
            }
            segments.push(outcome.segment);
        }

        let plan = TripPlan {
            ordered_destinations: ordered,
            segments,
            transit_details,
            first_segment_stops,
        };

        info!(
            %mode,
            segments = plan.segments.len(),
            distance_km = plan.total_distance_km(),
            fully_routed = plan.fully_routed(),
            "assembled trip plan"
        );

        Ok(plan)
    }
}
