//! Trip destination type.

use super::Coordinate;

/// A destination supplied with a planning request.
///
/// Ephemeral: destinations exist only for the duration of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    /// Caller-supplied identifier, echoed back in the response.
    pub id: String,

    /// Display name for the destination.
    pub name: String,

    /// Destination position.
    pub position: Coordinate,
}

impl Destination {
    /// Create a new destination.
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
        }
    }
}
