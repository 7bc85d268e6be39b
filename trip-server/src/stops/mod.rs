//! Stop dataset loading and nearest-stop lookup.
//!
//! The stop set is loaded once at startup from a GeoJSON file and held
//! as an immutable snapshot; concurrent requests read it without
//! synchronization.

mod error;
mod index;
mod loader;

pub use error::StopError;
pub use index::StopIndex;
pub use loader::load_stops;
