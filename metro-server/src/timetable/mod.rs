//! Timetable data: departure times and line directions.
//!
//! Both tables are loaded once at startup and read-only afterwards. The
//! planner uses them to turn a static path into a time-anchored itinerary by
//! resolving how long the passenger waits for the first train.

mod directions;
mod index;

pub use directions::{Direction, LineDirection, LineDirections};
pub use index::{Timetable, WaitTime};
