//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from data loading and HTTP errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Consecutive ride segments don't share a station
    #[error("segments do not connect: {alight} then {board}")]
    SegmentsNotConnected { alight: String, board: String },
}
