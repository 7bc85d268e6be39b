//! Trip planner.
//!
//! This module implements the core planning pipeline: order the
//! destinations with a nearest-neighbor heuristic, route each
//! consecutive pair (directly for driving, via a walk + bus-proxy +
//! walk composition for transit), and assemble the segments into a
//! single plan.
//!
//! The pipeline never fails a whole request over an upstream problem:
//! routing failures degrade individual segments to straight-line
//! estimates, and only structural input errors (no destinations) are
//! returned to the caller.

mod assemble;
mod config;
mod order;
mod segment;
mod transit;

pub use assemble::{PlanError, RoutePlanner};
pub use config::PlannerConfig;
pub use order::visit_order;
pub use segment::{PathSource, SegmentRouter};
pub use transit::{SegmentOutcome, TransitComposer};
