//! Nearest-stop index.

use crate::domain::{Coordinate, Stop, haversine_km};

use super::error::StopError;

/// Nearest-stop lookup over the loaded stop set.
///
/// A linear scan is sufficient at the dataset's scale (low thousands of
/// stops); a spatial index would be an optimization, not a requirement.
#[derive(Debug, Clone, Default)]
pub struct StopIndex {
    stops: Vec<Stop>,
}

impl StopIndex {
    /// Create an index over the given stops.
    pub fn new(stops: Vec<Stop>) -> Self {
        Self { stops }
    }

    /// Find the stop nearest to a coordinate, with its distance in km.
    ///
    /// Ties resolve to the earliest-loaded stop. Returns
    /// `StopError::NoNearbyStop` when no stops are loaded.
    pub fn nearest(&self, to: Coordinate) -> Result<(&Stop, f64), StopError> {
        let mut best: Option<(&Stop, f64)> = None;

        for stop in &self.stops {
            let distance = haversine_km(to, stop.position);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((stop, distance)),
            }
        }

        best.ok_or(StopError::NoNearbyStop)
    }

    /// The `limit` stops nearest to a coordinate, closest first, each
    /// with its distance in km. Returns fewer when the index is smaller.
    pub fn nearest_n(&self, to: Coordinate, limit: usize) -> Vec<(&Stop, f64)> {
        let mut ranked: Vec<(&Stop, f64)> = self
            .stops
            .iter()
            .map(|stop| (stop, haversine_km(to, stop.position)))
            .collect();

        // Stable sort: equal distances keep load order.
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked.truncate(limit);
        ranked
    }

    /// Number of stops in the index.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// True if no stops are loaded.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// All stops, in load order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn stop(id: &str, lat: f64, lon: f64) -> Stop {
        Stop::new(id, format!("Stop {id}"), coord(lat, lon))
    }

    #[test]
    fn nearest_picks_minimum_distance() {
        let index = StopIndex::new(vec![
            stop("a", 50.0, 15.0),
            stop("b", 50.21, 15.84),
            stop("c", 51.0, 16.0),
        ]);

        let (found, distance) = index.nearest(coord(50.2091, 15.8327)).unwrap();
        assert_eq!(found.id, "b");
        assert!(distance < 1.0);
    }

    #[test]
    fn nearest_on_empty_index_fails() {
        let index = StopIndex::default();
        assert!(matches!(
            index.nearest(coord(50.0, 15.0)),
            Err(StopError::NoNearbyStop)
        ));
    }

    #[test]
    fn ties_resolve_to_earliest_stop() {
        // Two stops at the same position: the first one loaded wins.
        let index = StopIndex::new(vec![stop("first", 50.0, 15.0), stop("second", 50.0, 15.0)]);

        let (found, distance) = index.nearest(coord(50.0, 15.0)).unwrap();
        assert_eq!(found.id, "first");
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn nearest_n_ranks_and_truncates() {
        let index = StopIndex::new(vec![
            stop("far", 51.0, 16.0),
            stop("near", 50.21, 15.84),
            stop("mid", 50.0, 15.0),
        ]);

        let ranked = index.nearest_n(coord(50.2091, 15.8327), 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0.id, "near");
        assert_eq!(ranked[1].0.id, "mid");
        assert!(ranked[0].1 <= ranked[1].1);

        // Limit past the index size returns everything.
        assert_eq!(index.nearest_n(coord(50.2091, 15.8327), 10).len(), 3);
        assert!(index.nearest_n(coord(50.2091, 15.8327), 0).is_empty());
    }

    #[test]
    fn exact_match_has_zero_distance() {
        let index = StopIndex::new(vec![stop("a", 50.2091, 15.8327)]);
        let (_, distance) = index.nearest(coord(50.2091, 15.8327)).unwrap();
        assert_eq!(distance, 0.0);
    }
}
