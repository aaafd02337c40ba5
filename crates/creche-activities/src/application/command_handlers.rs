//! Command handlers for the Activities context.
//!
//! Each handler loads the aggregate, executes the command and persists the
//! resulting events.

use creche_core::aggregate::AggregateRoot;
use creche_core::clock::Clock;
use creche_core::command::Command;
use creche_core::error::DomainError;
use creche_core::repository::{EventRepository, StoredEvent};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::aggregates::{Activity, EnrollmentOutcome};
use crate::domain::commands::{CreateActivity, EnrollParticipant};
use crate::domain::config::RosterConfig;
use crate::domain::events::{ActivityEvent, ActivityEventKind};

/// Result of a successfully handled creation command.
#[derive(Debug)]
pub struct ActivityCommandResult {
    /// The aggregate ID created by the command.
    pub aggregate_id: Uuid,
    /// The stored events produced and persisted.
    pub stored_events: Vec<StoredEvent>,
}

/// Result of an enrollment command. `stored_events` is empty when the
/// roster was full.
#[derive(Debug)]
pub struct EnrollmentResult {
    /// The activity the child was enrolled in.
    pub aggregate_id: Uuid,
    /// Whether the child made it onto the roster.
    pub outcome: EnrollmentOutcome,
    /// The stored events produced and persisted.
    pub stored_events: Vec<StoredEvent>,
}

/// Reconstitutes an `Activity` from stored events.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if there are no events, and
/// `DomainError::Infrastructure` if a payload does not deserialize or the
/// history is inconsistent.
pub(crate) fn reconstitute(
    activity_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<Activity, DomainError> {
    let history = existing_events
        .iter()
        .map(|stored| {
            let kind: ActivityEventKind = serde_json::from_value(stored.payload.clone())
                .map_err(|e| {
                    DomainError::Infrastructure(format!("event deserialization failed: {e}"))
                })?;
            Ok(ActivityEvent {
                metadata: stored.metadata(),
                kind,
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;
    Activity::replay(activity_id, &history)
}

fn drain_stored_events(activity: &mut Activity) -> Vec<StoredEvent> {
    let stored_events = activity
        .uncommitted_events()
        .iter()
        .map(StoredEvent::from_event)
        .collect();
    activity.clear_uncommitted_events();
    stored_events
}

/// Handles the `CreateActivity` command: creates a new aggregate and persists
/// its creation event.
///
/// # Errors
///
/// Returns `DomainError` if event appending fails.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, name = %command.name))]
pub async fn handle_create_activity(
    command: &CreateActivity,
    config: RosterConfig,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<ActivityCommandResult, DomainError> {
    info!(command = command.command_type(), "handling command");

    let activity_id = Uuid::new_v4();
    let mut activity = Activity::create(
        activity_id,
        command.name.clone(),
        command.description.clone(),
        command.kind,
        config,
        command.correlation_id(),
        clock,
    );

    let stored_events = drain_stored_events(&mut activity);
    repo.append_events(activity_id, activity.version(), &stored_events)
        .await?;

    Ok(ActivityCommandResult {
        aggregate_id: activity_id,
        stored_events,
    })
}

/// Handles the `EnrollParticipant` command: reconstitutes the aggregate,
/// attempts the enrollment and persists the resulting event, if any.
///
/// A full roster is reported through `EnrollmentResult::outcome`; nothing is
/// appended in that case.
///
/// # Errors
///
/// Returns `DomainError` if event loading or appending fails.
#[instrument(skip_all, fields(activity_id = %command.activity_id, correlation_id = %command.correlation_id))]
pub async fn handle_enroll_participant(
    command: &EnrollParticipant,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<EnrollmentResult, DomainError> {
    info!(command = command.command_type(), "handling command");

    let existing_events = repo.load_events(command.activity_id).await?;
    let mut activity = reconstitute(command.activity_id, &existing_events)?;

    let outcome = activity.enroll_participant(
        command.child_name.clone(),
        command.dietary_restriction.clone(),
        command.parent_contact.clone(),
        command.correlation_id(),
        clock,
    );

    let stored_events = drain_stored_events(&mut activity);
    if !stored_events.is_empty() {
        repo.append_events(command.activity_id, activity.version(), &stored_events)
            .await?;
    }

    Ok(EnrollmentResult {
        aggregate_id: command.activity_id,
        outcome,
        stored_events,
    })
}
