//! Domain events for the Activities context.

use creche_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::kind::ActivityKind;

/// Event type identifier for `ActivityCreated`.
pub const ACTIVITY_CREATED_EVENT_TYPE: &str = "activity.created";

/// Event type identifier for `ParticipantEnrolled`.
pub const PARTICIPANT_ENROLLED_EVENT_TYPE: &str = "activity.participant_enrolled";

/// Emitted once, when an activity is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityCreated {
    /// The activity identifier.
    pub activity_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Category label.
    pub kind: ActivityKind,
    /// Roster capacity in force for the activity's lifetime.
    pub max_capacity: usize,
}

/// Emitted when a child is added to the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantEnrolled {
    /// The activity identifier.
    pub activity_id: Uuid,
    /// The child's name.
    pub child_name: String,
    /// The child's dietary restriction.
    pub dietary_restriction: String,
    /// Parent email or phone number.
    pub parent_contact: String,
}

/// Event payload variants for the Activities context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActivityEventKind {
    /// An activity has been created.
    ActivityCreated(ActivityCreated),
    /// A participant has been enrolled.
    ParticipantEnrolled(ParticipantEnrolled),
}

/// Domain event envelope for the Activities context.
#[derive(Debug, Clone)]
pub struct ActivityEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ActivityEventKind,
}

impl DomainEvent for ActivityEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            ActivityEventKind::ActivityCreated(_) => ACTIVITY_CREATED_EVENT_TYPE,
            ActivityEventKind::ParticipantEnrolled(_) => PARTICIPANT_ENROLLED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("ActivityEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
