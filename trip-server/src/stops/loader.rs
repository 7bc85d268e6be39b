//! GeoJSON stop dataset loader.
//!
//! Loads a `FeatureCollection` of point features into `Stop` values.
//! The dataset files carry the stop name in a `nazev` property (or
//! `name` as a fallback); geometry is GeoJSON, so longitude-first, and
//! the conversion to the latitude-first model happens here.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Coordinate, Stop};

use super::error::StopError;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    nazev: Option<String>,
    name: Option<String>,
}

/// Load stops from a GeoJSON file.
///
/// Features without point geometry, with out-of-range coordinates, or
/// without a name are skipped with a warning rather than failing the
/// whole load; a dataset with a few bad rows is still usable.
pub fn load_stops(path: impl AsRef<Path>) -> Result<Vec<Stop>, StopError> {
    let content = std::fs::read_to_string(path.as_ref())?;

    let collection: FeatureCollection =
        serde_json::from_str(&content).map_err(|e| StopError::Json {
            message: e.to_string(),
        })?;

    let mut stops = Vec::with_capacity(collection.features.len());

    for (idx, feature) in collection.features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            warn!(idx, "skipping stop feature without geometry");
            continue;
        };
        if geometry.kind != "Point" || geometry.coordinates.len() != 2 {
            warn!(idx, kind = %geometry.kind, "skipping non-point stop feature");
            continue;
        }

        // GeoJSON order: [lon, lat]
        let (lon, lat) = (geometry.coordinates[0], geometry.coordinates[1]);
        let position = match Coordinate::new(lat, lon) {
            Ok(p) => p,
            Err(e) => {
                warn!(idx, %e, "skipping stop feature with invalid position");
                continue;
            }
        };

        let Some(name) = feature.properties.nazev.or(feature.properties.name) else {
            warn!(idx, "skipping stop feature without a name");
            continue;
        };

        stops.push(Stop::new(idx.to_string(), name, position));
    }

    debug!(count = stops.len(), "loaded stop dataset");
    Ok(stops)
}
