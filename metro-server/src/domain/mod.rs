//! Domain types for the metro route planner.
//!
//! This module contains the core value types shared by the network, the
//! planner and the web layer. Types that carry invariants enforce them at
//! construction time.

mod error;
mod itinerary;
mod line;
mod station;
mod time;

pub use error::DomainError;
pub use itinerary::{Itinerary, ItineraryTotals, RideSegment};
pub use line::LineId;
pub use station::Station;
pub use time::{TimeError, add_minutes, format_hhmm, minutes_between, parse_hhmm};
