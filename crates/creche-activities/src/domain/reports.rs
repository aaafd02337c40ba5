//! Read-only reports produced by an activity.
//!
//! Reports are plain values; `Display` renders them as the line-oriented
//! text staff are used to, and callers choose where that text goes.

use std::fmt;

use serde::Serialize;

use super::participant::ParticipantRecord;

/// Everyone enrolled in one activity, in enrollment order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantListing {
    /// Name of the activity the listing belongs to.
    pub activity_name: String,
    /// Roster entries in enrollment order.
    pub entries: Vec<ParticipantRecord>,
}

impl fmt::Display for ParticipantListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Participants in activity: {}", self.activity_name)?;
        for entry in &self.entries {
            writeln!(f, " - Child: {}", entry.child_name)?;
            writeln!(f, "   Restriction: {}", entry.dietary_restriction)?;
            writeln!(f, "   Parent contact: {}", entry.parent_contact)?;
        }
        Ok(())
    }
}

/// A simulated notice to one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentNotification {
    /// Where the notice would be sent.
    pub parent_contact: String,
    /// Whose parent is being notified.
    pub child_name: String,
    /// The notice text.
    pub message: String,
}

/// One notification per roster entry. Nothing is actually delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationReport {
    /// The message sent to every parent.
    pub message: String,
    /// Per-parent records in enrollment order.
    pub notifications: Vec<ParentNotification>,
}

impl fmt::Display for NotificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sending notifications to parents...")?;
        for n in &self.notifications {
            writeln!(f, "Notification sent to {}: {}", n.parent_contact, n.message)?;
        }
        Ok(())
    }
}
