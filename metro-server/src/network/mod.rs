//! The in-memory metro network.
//!
//! Stations, lines and the directed edges the pathfinders search over.
//! The network is built once from reference data and then only changed by
//! adding or deleting whole lines.

mod error;
mod graph;
mod line;

pub use error::NetworkError;
pub use graph::{Edge, EdgeId, Network, StationId};
pub use line::{Line, LineSegment, NewLine};
