//! Network mutation error types.

use crate::domain::LineId;

/// Errors from adding a line to the network.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    /// Line identifier is blank
    #[error("line id must not be empty")]
    EmptyLineId,

    /// A station name is blank
    #[error("station name at position {0} is empty")]
    EmptyStationName(usize),

    /// A line needs at least two stations
    #[error("a line needs at least two stations, got {0}")]
    TooFewStations(usize),

    /// Distances must be one fewer than stations
    #[error("expected {expected} inter-station distances, got {actual}")]
    DistanceCountMismatch { expected: usize, actual: usize },

    /// A distance is negative, NaN or infinite
    #[error("distance at position {index} is invalid: {value}")]
    InvalidDistance { index: usize, value: f64 },

    /// A line with this identifier already exists
    #[error("line {0} already exists")]
    DuplicateLine(LineId),
}
