//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
///
/// Roster capacity exhaustion is deliberately absent: a full roster is an
/// enrollment outcome, not a failure.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No events exist for the requested aggregate.
    #[error("aggregate not found: {0}")]
    AggregateNotFound(Uuid),

    /// Optimistic concurrency conflict on append.
    #[error("concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The aggregate that had the conflict.
        aggregate_id: Uuid,
        /// The version the writer expected.
        expected: i64,
        /// The version actually stored.
        actual: i64,
    },

    /// Input rejected by domain rules.
    #[error("validation error: {0}")]
    Validation(String),

    /// Storage or (de)serialization failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
