//! Roster configuration.

use creche_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Roster size used when no other capacity is configured.
pub const DEFAULT_MAX_CAPACITY: usize = 50;

/// Limits applied to a new activity's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    max_capacity: usize,
}

impl RosterConfig {
    /// A configuration holding at most `max_capacity` participants.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `max_capacity` is zero.
    pub fn with_capacity(max_capacity: usize) -> Result<Self, DomainError> {
        if max_capacity == 0 {
            return Err(DomainError::Validation(
                "roster capacity must be at least 1".to_owned(),
            ));
        }
        Ok(Self { max_capacity })
    }

    /// Maximum number of participants.
    #[must_use]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}
