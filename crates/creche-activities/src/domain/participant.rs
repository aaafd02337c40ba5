//! Roster entries.

use serde::{Deserialize, Serialize};

/// One enrollment: the child, their dietary restriction and how to reach a
/// parent. The three fields are always written together.
///
/// None of the fields are validated. `parent_contact` may be an email
/// address, a phone number or anything else the caller supplies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    /// The child's name.
    pub child_name: String,
    /// Free-text dietary restriction; empty or "none" means no restriction.
    pub dietary_restriction: String,
    /// Parent email or phone number.
    pub parent_contact: String,
}

impl ParticipantRecord {
    /// Builds a record from its three parts.
    pub fn new(
        child_name: impl Into<String>,
        dietary_restriction: impl Into<String>,
        parent_contact: impl Into<String>,
    ) -> Self {
        Self {
            child_name: child_name.into(),
            dietary_restriction: dietary_restriction.into(),
            parent_contact: parent_contact.into(),
        }
    }

    /// Whether the child declared any dietary restriction.
    #[must_use]
    pub fn has_restriction(&self) -> bool {
        let restriction = self.dietary_restriction.trim();
        !restriction.is_empty() && !restriction.eq_ignore_ascii_case("none")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_none_mean_no_restriction() {
        assert!(!ParticipantRecord::new("Alice", "", "a@x.com").has_restriction());
        assert!(!ParticipantRecord::new("Alice", "   ", "a@x.com").has_restriction());
        assert!(!ParticipantRecord::new("Alice", "None", "a@x.com").has_restriction());
    }

    #[test]
    fn test_free_text_restriction_is_a_restriction() {
        assert!(ParticipantRecord::new("Bob", "peanut", "b@x.com").has_restriction());
    }
}
