//! Transit segment composition.
//!
//! Approximates a public-transport journey between two arbitrary points
//! as walk + bus-proxy + walk legs over the static stop dataset. No
//! timetable data exists for the proxy leg, so the driving router
//! stands in for the bus route shape; the descriptive record carries a
//! timetable deep link the user can follow for real departure times.
//!
//! When a directions service is configured, it is asked first; any
//! failure there degrades silently to the stop-proxy composition.

use tracing::{debug, warn};

use crate::directions::DirectionsClient;
use crate::domain::{
    Coordinate, LegMode, NearestStopInfo, RouteSegment, SourceStatus, TransitDetail,
};
use crate::stops::StopIndex;

use super::config::PlannerConfig;
use super::segment::{PathSource, SegmentRouter};

/// The result of routing one segment of a trip.
#[derive(Debug, Clone)]
pub struct SegmentOutcome {
    /// The segment geometry and totals.
    pub segment: RouteSegment,

    /// Transit descriptive record, for transit segments that could be
    /// composed.
    pub detail: Option<TransitDetail>,

    /// Nearest-stop records for the segment endpoints, when the
    /// stop-proxy composition was used.
    pub stops: Option<(NearestStopInfo, NearestStopInfo)>,
}

impl SegmentOutcome {
    /// An outcome with no transit metadata (driving segments).
    pub fn plain(segment: RouteSegment) -> Self {
        Self {
            segment,
            detail: None,
            stops: None,
        }
    }
}

/// Composes transit segments from walk and bus-proxy legs.
pub struct TransitComposer<'a, P: PathSource> {
    router: SegmentRouter<'a, P>,
    stops: &'a StopIndex,
    directions: Option<&'a DirectionsClient>,
    config: &'a PlannerConfig,
}

impl<'a, P: PathSource> TransitComposer<'a, P> {
    /// Create a new composer.
    pub fn new(
        source: &'a P,
        stops: &'a StopIndex,
        directions: Option<&'a DirectionsClient>,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            router: SegmentRouter::new(source, config),
            stops,
            directions,
            config,
        }
    }

    /// Compose a transit segment between two points.
    ///
    /// Never fails: when no nearby stop exists the segment is a
    /// straight-line estimate flagged `Degraded`, and the caller keeps
    /// assembling the rest of the plan.
    pub async fn compose(&self, from: Coordinate, to: Coordinate) -> SegmentOutcome {
        // Enhancement path: real transit routing when configured.
        if let Some(directions) = self.directions {
            match directions.transit_route(from, to).await {
                Ok(route) if !route.points.is_empty() => {
                    debug!(%from, %to, steps = route.steps.len(), "transit segment from directions service");
                    return self.from_directions(route);
                }
                Ok(_) => {
                    debug!(%from, %to, "directions returned empty geometry; using stop proxy");
                }
                Err(e) => {
                    debug!(%from, %to, error = %e, "directions unavailable; using stop proxy");
                }
            }
        }

        self.from_stop_proxy(from, to).await
    }

    /// Build an outcome from a successful directions response.
    fn from_directions(&self, route: crate::directions::TransitRoute) -> SegmentOutcome {
        let first = route.steps.first();
        let last = route.steps.last();

        let departure_stop = first.and_then(|s| s.departure_stop.clone());
        let arrival_stop = last.and_then(|s| s.arrival_stop.clone());

        let timetable_url = match (&departure_stop, &arrival_stop) {
            (Some(from_name), Some(to_name)) => self.timetable_link(from_name, to_name),
            _ => None,
        };

        let detail = TransitDetail {
            line: first.and_then(|s| s.line.clone()),
            num_stops: first.and_then(|s| s.num_stops),
            departure_stop: departure_stop.unwrap_or_else(|| "Origin".to_string()),
            arrival_stop: arrival_stop.unwrap_or_else(|| "Destination".to_string()),
            walk_to_stop_km: None,
            bus_km: None,
            walk_from_stop_km: None,
            timetable_url,
        };

        SegmentOutcome {
            segment: RouteSegment {
                mode: LegMode::Transit,
                points: route.points,
                distance_km: route.distance_km,
                duration_min: route.duration_min,
                status: SourceStatus::Routed,
            },
            detail: Some(detail),
            stops: None,
        }
    }

    /// Compose the walk + bus-proxy + walk approximation.
    async fn from_stop_proxy(&self, from: Coordinate, to: Coordinate) -> SegmentOutcome {
        let origin_stop = self.stops.nearest(from);
        let dest_stop = self.stops.nearest(to);

        let ((origin_stop, origin_stop_km), (dest_stop, dest_stop_km)) =
            match (origin_stop, dest_stop) {
                (Ok(o), Ok(d)) => (o, d),
                (origin, dest) => {
                    warn!(
                        %from, %to,
                        origin_ok = origin.is_ok(),
                        dest_ok = dest.is_ok(),
                        "no nearby stop; transit segment degraded to straight line"
                    );
                    return SegmentOutcome {
                        segment: RouteSegment::straight_line(
                            LegMode::Transit,
                            from,
                            to,
                            self.config.fallback_min_per_km(LegMode::Transit),
                            SourceStatus::Degraded,
                        ),
                        detail: None,
                        stops: None,
                    };
                }
            };

        // The three legs are independent; dispatch them together and
        // finalize the segment only after all of them resolve.
        let (walk_to, bus, walk_from) = tokio::join!(
            self.router
                .route(LegMode::Walk, from, origin_stop.position),
            self.router
                .route(LegMode::Transit, origin_stop.position, dest_stop.position),
            self.router.route(LegMode::Walk, dest_stop.position, to),
        );

        let detail = TransitDetail {
            line: None,
            num_stops: None,
            departure_stop: origin_stop.name.clone(),
            arrival_stop: dest_stop.name.clone(),
            walk_to_stop_km: Some(walk_to.distance_km),
            bus_km: Some(bus.distance_km),
            walk_from_stop_km: Some(walk_from.distance_km),
            timetable_url: self.timetable_link(&origin_stop.name, &dest_stop.name),
        };

        let stops = (
            NearestStopInfo {
                name: origin_stop.name.clone(),
                position: origin_stop.position,
                distance_km: origin_stop_km,
            },
            NearestStopInfo {
                name: dest_stop.name.clone(),
                position: dest_stop.position,
                distance_km: dest_stop_km,
            },
        );

        SegmentOutcome {
            segment: RouteSegment::concat(LegMode::Transit, vec![walk_to, bus, walk_from]),
            detail: Some(detail),
            stops: Some(stops),
        }
    }

    /// Build the timetable deep link for a stop pair.
    ///
    /// The link is informational only and never fetched by the server.
    fn timetable_link(&self, from_name: &str, to_name: &str) -> Option<String> {
        reqwest::Url::parse_with_params(
            &self.config.timetable_base_url,
            [("f", from_name), ("t", to_name)],
        )
        .map(|url| url.to_string())
        .ok()
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use super::*;
    use crate::directions::DirectionsConfig;
    use crate::domain::{Stop, haversine_km};
    use crate::planner::segment::test_support::{FailingSource, FixedSource};

    /// Bind an ephemeral port and answer the first request with a canned
    /// JSON body.
    async fn serve_once(body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;

            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len(),
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });

        format!("http://{addr}")
    }

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn index_with_stops() -> StopIndex {
        StopIndex::new(vec![
            Stop::new("1", "Terminál HD", coord(50.208, 15.83)),
            Stop::new("2", "Adalbertinum", coord(50.005, 15.705)),
        ])
    }

    #[tokio::test]
    async fn composes_three_legs_in_order() {
        let source = FixedSource {
            distance_km: 1.0,
            duration_min: 3.0,
        };
        let stops = index_with_stops();
        let config = PlannerConfig::default();
        let composer = TransitComposer::new(&source, &stops, None, &config);

        let from = coord(50.2091, 15.8327);
        let to = coord(50.00, 15.70);
        let outcome = composer.compose(from, to).await;

        // Three two-point legs concatenated.
        assert_eq!(outcome.segment.points.len(), 6);
        assert_eq!(outcome.segment.points.first(), Some(&from));
        assert_eq!(outcome.segment.points.last(), Some(&to));
        assert!((outcome.segment.distance_km - 3.0).abs() < 1e-9);
        assert!((outcome.segment.duration_min - 9.0).abs() < 1e-9);
        assert_eq!(outcome.segment.status, SourceStatus::Routed);

        let detail = outcome.detail.unwrap();
        assert_eq!(detail.departure_stop, "Terminál HD");
        assert_eq!(detail.arrival_stop, "Adalbertinum");
        assert_eq!(detail.walk_to_stop_km, Some(1.0));
        assert_eq!(detail.bus_km, Some(1.0));
        assert_eq!(detail.walk_from_stop_km, Some(1.0));

        let url = detail.timetable_url.unwrap();
        assert!(url.starts_with("https://idos.idnes.cz"));
        // Stop names are URL-encoded into the query.
        assert!(url.contains("f=Termin%C3%A1l"));

        let (origin_info, dest_info) = outcome.stops.unwrap();
        assert_eq!(origin_info.name, "Terminál HD");
        assert_eq!(dest_info.name, "Adalbertinum");
    }

    #[tokio::test]
    async fn empty_stop_set_degrades() {
        let source = FixedSource {
            distance_km: 1.0,
            duration_min: 3.0,
        };
        let stops = StopIndex::default();
        let config = PlannerConfig::default();
        let composer = TransitComposer::new(&source, &stops, None, &config);

        let from = coord(50.2091, 15.8327);
        let to = coord(50.00, 15.70);
        let outcome = composer.compose(from, to).await;

        assert_eq!(outcome.segment.status, SourceStatus::Degraded);
        assert_eq!(outcome.segment.points, vec![from, to]);
        assert!(outcome.detail.is_none());
        assert!(outcome.stops.is_none());

        // Totals are still finite estimates.
        let expected_km = haversine_km(from, to);
        assert!((outcome.segment.distance_km - expected_km).abs() < 1e-9);
        assert!(outcome.segment.duration_min.is_finite());
    }

    #[tokio::test]
    async fn directions_success_routes_the_segment() {
        // Overview polyline decodes to two points: (38.5, -120.2) and
        // (40.7, -120.95).
        let body = r#"{
            "status": "OK",
            "routes": [{
                "overview_polyline": {"points": "_p~iF~ps|U_ulLnnqC"},
                "legs": [{
                    "distance": {"text": "5.2 km", "value": 5200},
                    "duration": {"text": "18 mins", "value": 1080},
                    "steps": [
                        {"travel_mode": "WALKING"},
                        {
                            "travel_mode": "TRANSIT",
                            "transit_details": {
                                "line": {"short_name": "12"},
                                "departure_stop": {"name": "Terminál HD"},
                                "arrival_stop": {"name": "Adalbertinum"},
                                "num_stops": 4
                            }
                        }
                    ]
                }]
            }]
        }"#;
        let base_url = serve_once(body).await;
        let directions = DirectionsClient::new(
            DirectionsConfig::new("test-key")
                .with_base_url(base_url)
                .with_timeout(2),
        )
        .unwrap();

        let source = FixedSource {
            distance_km: 1.0,
            duration_min: 3.0,
        };
        let stops = index_with_stops();
        let config = PlannerConfig::default();
        let composer = TransitComposer::new(&source, &stops, Some(&directions), &config);

        let outcome = composer
            .compose(coord(50.2091, 15.8327), coord(50.00, 15.70))
            .await;

        assert_eq!(outcome.segment.status, SourceStatus::Routed);
        assert_eq!(outcome.segment.points.len(), 2);
        assert!((outcome.segment.points[0].lat() - 38.5).abs() < 1e-9);
        assert!((outcome.segment.distance_km - 5.2).abs() < 1e-9);
        assert!((outcome.segment.duration_min - 18.0).abs() < 1e-9);

        let detail = outcome.detail.unwrap();
        assert_eq!(detail.line.as_deref(), Some("12"));
        assert_eq!(detail.num_stops, Some(4));
        assert_eq!(detail.departure_stop, "Terminál HD");
        assert_eq!(detail.arrival_stop, "Adalbertinum");
        assert!(detail.walk_to_stop_km.is_none());
        assert!(detail.timetable_url.is_some());

        // The directions path carries no nearest-stop records.
        assert!(outcome.stops.is_none());
    }

    #[tokio::test]
    async fn directions_empty_geometry_uses_stop_proxy() {
        let body = r#"{
            "status": "OK",
            "routes": [{
                "overview_polyline": {"points": ""},
                "legs": [{
                    "distance": {"text": "5.2 km", "value": 5200},
                    "duration": {"text": "18 mins", "value": 1080},
                    "steps": []
                }]
            }]
        }"#;
        let base_url = serve_once(body).await;
        let directions = DirectionsClient::new(
            DirectionsConfig::new("test-key")
                .with_base_url(base_url)
                .with_timeout(2),
        )
        .unwrap();

        let source = FixedSource {
            distance_km: 1.0,
            duration_min: 3.0,
        };
        let stops = index_with_stops();
        let config = PlannerConfig::default();
        let composer = TransitComposer::new(&source, &stops, Some(&directions), &config);

        let outcome = composer
            .compose(coord(50.2091, 15.8327), coord(50.00, 15.70))
            .await;

        // Stop-proxy composition: three two-point legs, stops from the
        // index.
        assert_eq!(outcome.segment.points.len(), 6);
        let detail = outcome.detail.unwrap();
        assert_eq!(detail.departure_stop, "Terminál HD");
        assert_eq!(detail.arrival_stop, "Adalbertinum");
        assert!(outcome.stops.is_some());
    }

    #[tokio::test]
    async fn directions_failure_falls_back_to_stop_proxy() {
        // Port 9 refuses connections; the composer must degrade silently
        // to the stop-proxy composition, not fail the segment.
        let directions = DirectionsClient::new(
            DirectionsConfig::new("test-key")
                .with_base_url("http://127.0.0.1:9")
                .with_timeout(1),
        )
        .unwrap();

        let source = FixedSource {
            distance_km: 1.0,
            duration_min: 3.0,
        };
        let stops = index_with_stops();
        let config = PlannerConfig::default();
        let composer = TransitComposer::new(&source, &stops, Some(&directions), &config);

        let outcome = composer
            .compose(coord(50.2091, 15.8327), coord(50.00, 15.70))
            .await;

        assert_eq!(outcome.segment.status, SourceStatus::Routed);
        assert_eq!(outcome.segment.points.len(), 6);

        let detail = outcome.detail.unwrap();
        assert_eq!(detail.departure_stop, "Terminál HD");
        assert_eq!(detail.arrival_stop, "Adalbertinum");
        assert_eq!(detail.walk_to_stop_km, Some(1.0));
        assert!(outcome.stops.is_some());
    }

    #[tokio::test]
    async fn upstream_failure_falls_back_per_leg() {
        let stops = index_with_stops();
        let config = PlannerConfig::default();
        let composer = TransitComposer::new(&FailingSource, &stops, None, &config);

        let from = coord(50.2091, 15.8327);
        let to = coord(50.00, 15.70);
        let outcome = composer.compose(from, to).await;

        // All legs fell back, but the segment still composed.
        assert_eq!(outcome.segment.status, SourceStatus::Fallback);
        assert!(outcome.detail.is_some());
        assert!(outcome.segment.distance_km > 0.0);
        assert!(outcome.segment.duration_min.is_finite());
    }
}
