//! Visiting-order optimization.

use crate::domain::{Coordinate, Destination, haversine_km};

/// Order destinations with a greedy nearest-neighbor heuristic.
///
/// The origin is fixed first; from the last visited point, the nearest
/// unvisited destination is selected repeatedly. O(n²) and
/// deterministic: ties are broken by original input order, and
/// duplicate coordinates are treated as distinct stops. Not globally
/// optimal by design.
///
/// Zero or one destination is returned unchanged.
pub fn visit_order(origin: Coordinate, destinations: Vec<Destination>) -> Vec<Destination> {
    if destinations.len() <= 1 {
        return destinations;
    }

    let mut remaining = destinations;
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut current = origin;

    while !remaining.is_empty() {
        let mut nearest_idx = 0;
        let mut nearest_distance = f64::INFINITY;

        for (idx, destination) in remaining.iter().enumerate() {
            let distance = haversine_km(current, destination.position);
            // Strict `<` keeps the earliest entry on ties.
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest_idx = idx;
            }
        }

        let next = remaining.remove(nearest_idx);
        current = next.position;
        ordered.push(next);
    }

    ordered
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn destinations(max: usize) -> impl Strategy<Value = Vec<Destination>> {
        proptest::collection::vec((-80.0f64..=80.0, -170.0f64..=170.0), 0..max).prop_map(|points| {
            points
                .into_iter()
                .enumerate()
                .map(|(i, (lat, lon))| {
                    Destination::new(i.to_string(), "", Coordinate::new(lat, lon).unwrap())
                })
                .collect()
        })
    }

    proptest! {
        /// The output is a permutation of the input.
        #[test]
        fn output_is_permutation(dests in destinations(12)) {
            let origin = Coordinate::new(50.0, 15.0).unwrap();
            let input_len = dests.len();
            let mut input_ids: Vec<String> = dests.iter().map(|d| d.id.clone()).collect();

            let ordered = visit_order(origin, dests);
            let mut output_ids: Vec<String> = ordered.iter().map(|d| d.id.clone()).collect();

            prop_assert_eq!(ordered.len(), input_len);
            input_ids.sort();
            output_ids.sort();
            prop_assert_eq!(input_ids, output_ids);
        }

        /// Identical input yields identical output.
        #[test]
        fn deterministic(dests in destinations(10)) {
            let origin = Coordinate::new(50.0, 15.0).unwrap();
            let a = visit_order(origin, dests.clone());
            let b = visit_order(origin, dests);
            prop_assert_eq!(a, b);
        }
    }
}
