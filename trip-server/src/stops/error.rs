//! Stop dataset error types.

/// Errors from loading or querying the stop dataset.
#[derive(Debug, thiserror::Error)]
pub enum StopError {
    /// Could not read the dataset file
    #[error("failed to read stop dataset: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset was not valid GeoJSON of the expected shape
    #[error("failed to parse stop dataset: {message}")]
    Json { message: String },

    /// A nearest-stop query ran against an empty stop set
    #[error("no stops loaded; cannot find a nearby stop")]
    NoNearbyStop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StopError::NoNearbyStop;
        assert_eq!(err.to_string(), "no stops loaded; cannot find a nearby stop");

        let err = StopError::Json {
            message: "expected FeatureCollection".into(),
        };
        assert!(err.to_string().contains("failed to parse stop dataset"));
    }
}
