//! Multi-modal trip-routing server.
//!
//! Given a starting point and a set of destinations, produces a single
//! traversable route: a visiting order, per-segment geometry, and
//! aggregated distance/duration. Public-transport legs are approximated
//! from a static stop dataset when no timetable data is available, and
//! upstream routing failures degrade to straight-line estimates rather
//! than failing the request.

pub mod cache;
pub mod directions;
pub mod domain;
pub mod osrm;
pub mod planner;
pub mod polyline;
pub mod stops;
pub mod web;
