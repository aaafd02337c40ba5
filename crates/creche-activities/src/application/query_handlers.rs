//! Query handlers for the Activities context.
//!
//! Queries reconstitute the aggregate from stored events and return
//! read-only views and reports. Nothing is persisted.

use creche_core::aggregate::AggregateRoot;
use creche_core::error::DomainError;
use creche_core::repository::EventRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::aggregates::Activity;
use crate::domain::kind::ActivityKind;
use crate::domain::policy::{CompatibilityReport, DietaryPolicy, RosterUpdate};
use crate::domain::reports::{NotificationReport, ParticipantListing};

/// Read-only view of an activity aggregate.
#[derive(Debug, Serialize)]
pub struct ActivityView {
    /// The activity identifier.
    pub activity_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Category label.
    pub kind: ActivityKind,
    /// Number of enrolled children.
    pub participant_count: usize,
    /// Roster limit.
    pub max_capacity: usize,
    /// Current version (event count).
    pub version: i64,
}

/// Outcome of running a dietary policy over a roster.
#[derive(Debug, Serialize)]
pub struct DietaryReview {
    /// Per-child verdicts.
    pub compatibility: CompatibilityReport,
    /// Proposed remedies for incompatible children.
    pub remedies: RosterUpdate,
}

async fn load(activity_id: Uuid, repo: &dyn EventRepository) -> Result<Activity, DomainError> {
    let stored_events = repo.load_events(activity_id).await?;
    command_handlers::reconstitute(activity_id, &stored_events)
}

/// Retrieves an activity by its aggregate ID.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_activity_by_id(
    activity_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<ActivityView, DomainError> {
    let activity = load(activity_id, repo).await?;
    Ok(ActivityView {
        activity_id,
        name: activity.name().to_owned(),
        description: activity.description().to_owned(),
        kind: activity.kind(),
        participant_count: activity.participant_count(),
        max_capacity: activity.max_capacity(),
        version: activity.version(),
    })
}

/// Lists an activity's participants in enrollment order.
///
/// # Errors
///
/// Same as [`get_activity_by_id`].
pub async fn list_participants(
    activity_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<ParticipantListing, DomainError> {
    Ok(load(activity_id, repo).await?.list_participants())
}

/// Sends `message` to every enrolled child's parent (simulated).
///
/// # Errors
///
/// Same as [`get_activity_by_id`].
pub async fn notify_parents(
    activity_id: Uuid,
    message: &str,
    repo: &dyn EventRepository,
) -> Result<NotificationReport, DomainError> {
    Ok(load(activity_id, repo).await?.notify_parents(message))
}

/// Runs `policy` over an activity's roster and collects its remedies.
///
/// # Errors
///
/// Same as [`get_activity_by_id`].
pub async fn review_dietary_compatibility(
    activity_id: Uuid,
    policy: &dyn DietaryPolicy,
    repo: &dyn EventRepository,
) -> Result<DietaryReview, DomainError> {
    let activity = load(activity_id, repo).await?;
    let compatibility = activity.verify_compatibility(policy);
    let remedies = activity.resolve_incompatibilities(policy, &compatibility);
    Ok(DietaryReview {
        compatibility,
        remedies,
    })
}
