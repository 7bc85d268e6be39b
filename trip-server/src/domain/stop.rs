//! Public-transport stop type.

use super::Coordinate;

/// A public-transport stop from the static dataset.
///
/// Stops are loaded once at startup and owned by the stop index;
/// they never change for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Stable identifier within the dataset.
    pub id: String,

    /// Human-readable stop name, used for timetable deep links.
    pub name: String,

    /// Stop position.
    pub position: Coordinate,
}

impl Stop {
    /// Create a new stop.
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
        }
    }
}
