//! Commands for the Activities context.

use creche_core::command::Command;
use uuid::Uuid;

use super::kind::ActivityKind;

/// Command to create a new activity with an empty roster.
#[derive(Debug, Clone)]
pub struct CreateActivity {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Category label.
    pub kind: ActivityKind,
}

/// Command to enroll a child in an activity.
#[derive(Debug, Clone)]
pub struct EnrollParticipant {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The activity identifier.
    pub activity_id: Uuid,
    /// The child's name.
    pub child_name: String,
    /// The child's dietary restriction.
    pub dietary_restriction: String,
    /// Parent email or phone number.
    pub parent_contact: String,
}

impl Command for CreateActivity {
    fn command_type(&self) -> &'static str {
        "activity.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for EnrollParticipant {
    fn command_type(&self) -> &'static str {
        "activity.enroll_participant"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
