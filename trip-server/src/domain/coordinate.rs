//! Geographic coordinate type and distance primitives.

use std::fmt;

/// Mean Earth radius in kilometres, used by the haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Error returned when constructing an out-of-range coordinate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate: {reason} (lat={lat}, lon={lon})")]
pub struct InvalidCoordinate {
    reason: &'static str,
    lat: f64,
    lon: f64,
}

/// A WGS84 coordinate in decimal degrees, latitude first.
///
/// Latitude is in [-90, 90] and longitude in [-180, 180]. This type
/// guarantees that any `Coordinate` value is in range by construction,
/// so geometric code never has to re-validate.
///
/// # Examples
///
/// ```
/// use trip_server::domain::Coordinate;
///
/// let hk = Coordinate::new(50.2091, 15.8327).unwrap();
/// assert_eq!(hk.lat(), 50.2091);
///
/// // Out-of-range latitude is rejected
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Construct a coordinate, validating the range invariants.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoordinate {
                reason: "must be finite",
                lat,
                lon,
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: "latitude must be in [-90, 90]",
                lat,
                lon,
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate {
                reason: "longitude must be in [-180, 180]",
                lat,
                lon,
            });
        }

        Ok(Self { lat, lon })
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Great-circle distance between two coordinates in kilometres.
///
/// Haversine formula on a sphere of radius 6371 km. Symmetric, and zero
/// for identical points.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn new_accepts_valid_range() {
        assert!(Coordinate::new(0.0, 0.0).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(50.2091, 15.8327).is_ok());
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(Coordinate::new(90.01, 0.0).is_err());
        assert!(Coordinate::new(-90.01, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.01).is_err());
        assert!(Coordinate::new(0.0, -180.01).is_err());
    }

    #[test]
    fn new_rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn distance_zero_for_identical_points() {
        let p = coord(50.2091, 15.8327);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = coord(50.2091, 15.8327);
        let b = coord(50.0, 15.7);
        assert_eq!(haversine_km(a, b), haversine_km(b, a));
    }

    #[test]
    fn distance_known_value() {
        // Prague to Brno, roughly 185 km great-circle.
        let prague = coord(50.0755, 14.4378);
        let brno = coord(49.1951, 16.6068);
        let d = haversine_km(prague, brno);
        assert!((d - 185.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn distance_short_range() {
        // One degree of latitude is about 111.2 km.
        let a = coord(50.0, 15.0);
        let b = coord(51.0, 15.0);
        let d = haversine_km(a, b);
        assert!((d - 111.2).abs() < 0.5, "got {d}");
    }

    #[test]
    fn display() {
        let p = coord(50.5, -15.25);
        assert_eq!(format!("{}", p), "50.5,-15.25");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating valid coordinates.
    fn valid_coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(lat, lon)| Coordinate::new(lat, lon).unwrap())
    }

    proptest! {
        /// distance(a, b) == distance(b, a) for all valid coordinates
        #[test]
        fn symmetric(a in valid_coordinate(), b in valid_coordinate()) {
            let ab = haversine_km(a, b);
            let ba = haversine_km(b, a);
            prop_assert!((ab - ba).abs() < 1e-9);
        }

        /// Distance is never negative and never exceeds half the
        /// Earth's circumference
        #[test]
        fn bounded(a in valid_coordinate(), b in valid_coordinate()) {
            let d = haversine_km(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= EARTH_RADIUS_KM * std::f64::consts::PI + 1e-6);
        }

        /// distance(a, a) == 0 for all valid coordinates
        #[test]
        fn zero_on_identical(a in valid_coordinate()) {
            prop_assert!(haversine_km(a, a).abs() < 1e-9);
        }

        /// Any in-range pair constructs successfully
        #[test]
        fn valid_always_constructs(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            prop_assert!(Coordinate::new(lat, lon).is_ok());
        }
    }
}
