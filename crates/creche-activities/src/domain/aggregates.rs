//! Aggregate roots for the Activities context.

use creche_core::aggregate::AggregateRoot;
use creche_core::clock::Clock;
use creche_core::error::DomainError;
use creche_core::event::EventMetadata;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::config::RosterConfig;
use super::events::{
    ACTIVITY_CREATED_EVENT_TYPE, ActivityCreated, ActivityEvent, ActivityEventKind,
    PARTICIPANT_ENROLLED_EVENT_TYPE, ParticipantEnrolled,
};
use super::kind::ActivityKind;
use super::participant::ParticipantRecord;
use super::policy::{CompatibilityReport, DietaryPolicy, RosterUpdate};
use super::reports::{NotificationReport, ParentNotification, ParticipantListing};

/// Result of an enrollment attempt.
///
/// A full roster is not an error: the attempt is reported and ignored.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EnrollmentOutcome {
    /// The child was appended at `position` (0-based).
    Enrolled {
        /// Roster index of the new entry.
        position: usize,
    },
    /// The roster already held `capacity` children; nothing changed.
    CapacityExceeded {
        /// The roster limit that was hit.
        capacity: usize,
    },
}

impl EnrollmentOutcome {
    /// Whether the child made it onto the roster.
    #[must_use]
    pub fn is_enrolled(&self) -> bool {
        matches!(self, Self::Enrolled { .. })
    }
}

/// The aggregate root for a creche activity.
///
/// Name, description, kind and capacity are fixed at creation. The roster
/// only grows. Command methods update the roster as soon as they record an
/// event, while `version` only advances for persisted events replayed
/// through `apply`.
#[derive(Debug)]
pub struct Activity {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (persisted event count).
    pub(crate) version: i64,
    name: String,
    description: String,
    kind: ActivityKind,
    max_capacity: usize,
    roster: Vec<ParticipantRecord>,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<ActivityEvent>,
}

impl Activity {
    /// Creates a new activity with an empty roster, producing an
    /// `ActivityCreated` event.
    #[must_use]
    pub fn create(
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ActivityKind,
        config: RosterConfig,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Self {
        let mut activity = Self::from_created(&ActivityCreated {
            activity_id: id,
            name: name.into(),
            description: description.into(),
            kind,
            max_capacity: config.max_capacity(),
        });

        let event = ActivityEvent {
            metadata: EventMetadata::for_command(
                ACTIVITY_CREATED_EVENT_TYPE,
                id,
                activity.next_sequence_number(),
                correlation_id,
                clock.now(),
            ),
            kind: ActivityEventKind::ActivityCreated(ActivityCreated {
                activity_id: id,
                name: activity.name.clone(),
                description: activity.description.clone(),
                kind,
                max_capacity: activity.max_capacity,
            }),
        };
        activity.uncommitted_events.push(event);

        info!(activity_id = %id, name = %activity.name, %kind, "activity created");
        activity
    }

    fn from_created(created: &ActivityCreated) -> Self {
        Self {
            id: created.activity_id,
            version: 0,
            name: created.name.clone(),
            description: created.description.clone(),
            kind: created.kind,
            max_capacity: created.max_capacity,
            roster: Vec::new(),
            uncommitted_events: Vec::new(),
        }
    }

    /// Rebuilds an activity from its persisted history.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the history does not start
    /// with `ActivityCreated`, contains a second creation, or enrolls more
    /// children than the recorded capacity.
    pub fn replay(id: Uuid, history: &[ActivityEvent]) -> Result<Self, DomainError> {
        let Some((first, rest)) = history.split_first() else {
            return Err(DomainError::AggregateNotFound(id));
        };
        let ActivityEventKind::ActivityCreated(created) = &first.kind else {
            return Err(DomainError::Infrastructure(format!(
                "history of activity {id} does not start with {ACTIVITY_CREATED_EVENT_TYPE}"
            )));
        };

        let mut activity = Self::from_created(created);
        activity.id = id;
        activity.apply(first);
        for event in rest {
            match &event.kind {
                ActivityEventKind::ActivityCreated(_) => {
                    return Err(DomainError::Infrastructure(format!(
                        "activity {id} was created twice"
                    )));
                }
                ActivityEventKind::ParticipantEnrolled(_) if activity.is_full() => {
                    return Err(DomainError::Infrastructure(format!(
                        "history of activity {id} exceeds roster capacity {}",
                        activity.max_capacity
                    )));
                }
                ActivityEventKind::ParticipantEnrolled(_) => activity.apply(event),
            }
        }
        Ok(activity)
    }

    /// The activity's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The activity's description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The activity's category.
    #[must_use]
    pub fn kind(&self) -> ActivityKind {
        self.kind
    }

    /// Roster entries in enrollment order.
    #[must_use]
    pub fn roster(&self) -> &[ParticipantRecord] {
        &self.roster
    }

    /// Number of enrolled children.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.roster.len()
    }

    /// Roster limit.
    #[must_use]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Whether further enrollments will be rejected.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.roster.len() >= self.max_capacity
    }

    /// Enrolls a child, producing a `ParticipantEnrolled` event.
    ///
    /// Arguments are accepted as given. On a full roster nothing is recorded
    /// and `EnrollmentOutcome::CapacityExceeded` is returned.
    pub fn enroll_participant(
        &mut self,
        child_name: impl Into<String>,
        dietary_restriction: impl Into<String>,
        parent_contact: impl Into<String>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> EnrollmentOutcome {
        if self.is_full() {
            warn!(
                activity_id = %self.id,
                activity = %self.name,
                capacity = self.max_capacity,
                "roster is full, enrollment rejected"
            );
            return EnrollmentOutcome::CapacityExceeded {
                capacity: self.max_capacity,
            };
        }

        let record = ParticipantRecord::new(child_name, dietary_restriction, parent_contact);
        let event = ActivityEvent {
            metadata: EventMetadata::for_command(
                PARTICIPANT_ENROLLED_EVENT_TYPE,
                self.id,
                self.next_sequence_number(),
                correlation_id,
                clock.now(),
            ),
            kind: ActivityEventKind::ParticipantEnrolled(ParticipantEnrolled {
                activity_id: self.id,
                child_name: record.child_name.clone(),
                dietary_restriction: record.dietary_restriction.clone(),
                parent_contact: record.parent_contact.clone(),
            }),
        };

        let position = self.roster.len();
        debug!(activity_id = %self.id, child = %record.child_name, position, "participant enrolled");
        self.roster.push(record);
        self.uncommitted_events.push(event);
        EnrollmentOutcome::Enrolled { position }
    }

    /// Lists the roster under the activity's name.
    #[must_use]
    pub fn list_participants(&self) -> ParticipantListing {
        ParticipantListing {
            activity_name: self.name.clone(),
            entries: self.roster.clone(),
        }
    }

    /// Builds one simulated notification per enrolled child.
    #[must_use]
    pub fn notify_parents(&self, message: &str) -> NotificationReport {
        let notifications = self
            .roster
            .iter()
            .map(|p| {
                debug!(activity_id = %self.id, contact = %p.parent_contact, "parent notified");
                ParentNotification {
                    parent_contact: p.parent_contact.clone(),
                    child_name: p.child_name.clone(),
                    message: message.to_owned(),
                }
            })
            .collect();
        NotificationReport {
            message: message.to_owned(),
            notifications,
        }
    }

    /// Asks `policy` which children can take part.
    #[must_use]
    pub fn verify_compatibility(&self, policy: &dyn DietaryPolicy) -> CompatibilityReport {
        policy.verify_compatibility(self.kind, &self.roster)
    }

    /// Asks `policy` for remedies to the incompatibilities in `report`.
    #[must_use]
    pub fn resolve_incompatibilities(
        &self,
        policy: &dyn DietaryPolicy,
        report: &CompatibilityReport,
    ) -> RosterUpdate {
        policy.resolve_incompatibilities(self.kind, &self.roster, report)
    }
}

impl AggregateRoot for Activity {
    type Event = ActivityEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            ActivityEventKind::ActivityCreated(_) => {}
            ActivityEventKind::ParticipantEnrolled(payload) => {
                self.roster.push(ParticipantRecord::new(
                    payload.child_name.clone(),
                    payload.dietary_restriction.clone(),
                    payload.parent_contact.clone(),
                ));
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policies::{AllergenPolicy, RemedyStrategy};
    use crate::domain::policy::RemedyAction;
    use creche_core::event::DomainEvent;
    use creche_test_support::{FixedClock, fixed_clock};

    fn painting(clock: &FixedClock) -> Activity {
        Activity::create(
            Uuid::new_v4(),
            "Painting",
            "Finger painting session",
            ActivityKind::ArtsAndCrafts,
            RosterConfig::default(),
            Uuid::new_v4(),
            clock,
        )
    }

    #[test]
    fn test_create_produces_activity_created_event() {
        // Arrange
        let activity_id = Uuid::new_v4();
        let correlation_id = Uuid::new_v4();
        let clock = fixed_clock();

        // Act
        let activity = Activity::create(
            activity_id,
            "Painting",
            "Finger painting session",
            ActivityKind::ArtsAndCrafts,
            RosterConfig::default(),
            correlation_id,
            &clock,
        );

        // Assert
        assert_eq!(activity.name(), "Painting");
        assert_eq!(activity.description(), "Finger painting session");
        assert_eq!(activity.kind(), ActivityKind::ArtsAndCrafts);
        assert_eq!(activity.participant_count(), 0);
        assert_eq!(activity.max_capacity(), 50);

        let events = activity.uncommitted_events();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.event_type(), ACTIVITY_CREATED_EVENT_TYPE);

        let meta = event.metadata();
        assert_eq!(meta.aggregate_id, activity_id);
        assert_eq!(meta.sequence_number, 1);
        assert_eq!(meta.correlation_id, correlation_id);
        assert_eq!(meta.occurred_at, clock.0);

        match &event.kind {
            ActivityEventKind::ActivityCreated(payload) => {
                assert_eq!(payload.activity_id, activity_id);
                assert_eq!(payload.name, "Painting");
                assert_eq!(payload.max_capacity, 50);
            }
            other => panic!("expected ActivityCreated, got {other:?}"),
        }
    }

    #[test]
    fn test_create_accepts_empty_strings() {
        let activity = Activity::create(
            Uuid::new_v4(),
            "",
            "",
            ActivityKind::Music,
            RosterConfig::default(),
            Uuid::new_v4(),
            &fixed_clock(),
        );

        assert_eq!(activity.name(), "");
        assert_eq!(activity.description(), "");
    }

    #[test]
    fn test_enroll_participant_appends_record_and_event() {
        // Arrange
        let clock = fixed_clock();
        let mut activity = painting(&clock);
        let correlation_id = Uuid::new_v4();

        // Act
        let outcome =
            activity.enroll_participant("Alice", "none", "a@x.com", correlation_id, &clock);

        // Assert
        assert_eq!(outcome, EnrollmentOutcome::Enrolled { position: 0 });
        assert_eq!(
            activity.roster(),
            &[ParticipantRecord::new("Alice", "none", "a@x.com")]
        );

        let events = activity.uncommitted_events();
        assert_eq!(events.len(), 2);
        let event = &events[1];
        assert_eq!(event.event_type(), PARTICIPANT_ENROLLED_EVENT_TYPE);
        assert_eq!(event.metadata().sequence_number, 2);
        assert_eq!(event.metadata().correlation_id, correlation_id);
        match &event.kind {
            ActivityEventKind::ParticipantEnrolled(payload) => {
                assert_eq!(payload.activity_id, activity.id);
                assert_eq!(payload.child_name, "Alice");
                assert_eq!(payload.dietary_restriction, "none");
                assert_eq!(payload.parent_contact, "a@x.com");
            }
            other => panic!("expected ParticipantEnrolled, got {other:?}"),
        }
    }

    #[test]
    fn test_roster_keeps_enrollment_order_up_to_capacity() {
        let clock = fixed_clock();
        let mut activity = painting(&clock);

        for i in 0..50 {
            let outcome = activity.enroll_participant(
                format!("child-{i}"),
                "",
                format!("parent-{i}@x.com"),
                Uuid::new_v4(),
                &clock,
            );
            assert_eq!(outcome, EnrollmentOutcome::Enrolled { position: i });
        }

        assert_eq!(activity.participant_count(), 50);
        assert!(activity.is_full());
        let names: Vec<String> = activity
            .list_participants()
            .entries
            .into_iter()
            .map(|p| p.child_name)
            .collect();
        let expected: Vec<String> = (0..50).map(|i| format!("child-{i}")).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_enroll_on_full_roster_reports_capacity_exceeded_and_changes_nothing() {
        // Arrange
        let clock = fixed_clock();
        let mut activity = painting(&clock);
        for i in 0..50 {
            let _ = activity.enroll_participant(format!("child-{i}"), "", "", Uuid::new_v4(), &clock);
        }
        let events_before = activity.uncommitted_events().len();

        // Act
        let outcome =
            activity.enroll_participant("Late", "peanut", "late@x.com", Uuid::new_v4(), &clock);

        // Assert
        assert_eq!(outcome, EnrollmentOutcome::CapacityExceeded { capacity: 50 });
        assert!(!outcome.is_enrolled());
        assert_eq!(activity.participant_count(), 50);
        assert_eq!(activity.uncommitted_events().len(), events_before);
        assert!(activity.roster().iter().all(|p| p.child_name != "Late"));
    }

    #[test]
    fn test_custom_capacity_is_honoured() {
        let clock = fixed_clock();
        let mut activity = Activity::create(
            Uuid::new_v4(),
            "Baking",
            "Cupcakes",
            ActivityKind::Cooking,
            RosterConfig::with_capacity(1).unwrap(),
            Uuid::new_v4(),
            &clock,
        );

        let first = activity.enroll_participant("Alice", "", "a@x.com", Uuid::new_v4(), &clock);
        let second = activity.enroll_participant("Bob", "", "b@x.com", Uuid::new_v4(), &clock);

        assert!(first.is_enrolled());
        assert_eq!(second, EnrollmentOutcome::CapacityExceeded { capacity: 1 });
    }

    #[test]
    fn test_accessors_are_stable_across_enrollments_and_reports() {
        let clock = fixed_clock();
        let mut activity = painting(&clock);

        let _ = activity.enroll_participant("Alice", "none", "a@x.com", Uuid::new_v4(), &clock);
        let _ = activity.list_participants();
        let _ = activity.notify_parents("Hello");

        assert_eq!(activity.name(), "Painting");
        assert_eq!(activity.description(), "Finger painting session");
        assert_eq!(activity.kind(), ActivityKind::ArtsAndCrafts);
    }

    #[test]
    fn test_list_participants_on_empty_roster_has_header_only() {
        let activity = painting(&fixed_clock());

        let listing = activity.list_participants();

        assert_eq!(listing.activity_name, "Painting");
        assert!(listing.entries.is_empty());
        assert_eq!(listing.to_string().lines().count(), 1);
    }

    #[test]
    fn test_painting_scenario_lists_and_notifies_in_order() {
        // Arrange
        let clock = fixed_clock();
        let mut activity = painting(&clock);
        let _ = activity.enroll_participant("Alice", "none", "a@x.com", Uuid::new_v4(), &clock);
        let _ = activity.enroll_participant("Bob", "peanut", "b@x.com", Uuid::new_v4(), &clock);

        // Act
        let listing = activity.list_participants();
        let report = activity.notify_parents("Bring smocks");

        // Assert
        assert_eq!(activity.participant_count(), 2);
        let text = listing.to_string();
        let alice = text.find("Child: Alice").unwrap();
        let bob = text.find("Child: Bob").unwrap();
        assert!(alice < bob);

        let pairs: Vec<(&str, &str)> = report
            .notifications
            .iter()
            .map(|n| (n.parent_contact.as_str(), n.message.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("a@x.com", "Bring smocks"), ("b@x.com", "Bring smocks")]
        );
    }

    #[test]
    fn test_notify_parents_on_empty_roster_yields_no_notifications() {
        let activity = painting(&fixed_clock());

        let report = activity.notify_parents("Closed tomorrow");

        assert_eq!(report.message, "Closed tomorrow");
        assert!(report.notifications.is_empty());
    }

    #[test]
    fn test_compatibility_is_delegated_to_policy() {
        let clock = fixed_clock();
        let mut activity = painting(&clock);
        let _ = activity.enroll_participant("Alice", "none", "a@x.com", Uuid::new_v4(), &clock);
        let _ = activity.enroll_participant("Bob", "peanut", "b@x.com", Uuid::new_v4(), &clock);
        let policy = AllergenPolicy::new(["peanut"], RemedyStrategy::Exclude);

        let report = activity.verify_compatibility(&policy);
        let update = activity.resolve_incompatibilities(&policy, &report);

        assert_eq!(report.verdicts.len(), 2);
        assert_eq!(update.remedies.len(), 1);
        assert_eq!(update.remedies[0].child_name, "Bob");
        assert_eq!(update.remedies[0].action, RemedyAction::Exclude);
        assert_eq!(activity.participant_count(), 2);
    }

    #[test]
    fn test_replay_rebuilds_roster_and_version() {
        // Arrange
        let clock = fixed_clock();
        let mut original = painting(&clock);
        let _ = original.enroll_participant("Alice", "none", "a@x.com", Uuid::new_v4(), &clock);
        let _ = original.enroll_participant("Bob", "peanut", "b@x.com", Uuid::new_v4(), &clock);
        let history = original.uncommitted_events().to_vec();

        // Act
        let replayed = Activity::replay(original.id, &history).unwrap();

        // Assert
        assert_eq!(replayed.version(), 3);
        assert_eq!(replayed.name(), "Painting");
        assert_eq!(replayed.roster(), original.roster());
        assert!(replayed.uncommitted_events().is_empty());
        assert_eq!(replayed.next_sequence_number(), 4);
    }

    #[test]
    fn test_replay_rejects_history_without_creation() {
        let clock = fixed_clock();
        let mut original = painting(&clock);
        let _ = original.enroll_participant("Alice", "", "", Uuid::new_v4(), &clock);
        let history = original.uncommitted_events()[1..].to_vec();

        let result = Activity::replay(original.id, &history);

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[test]
    fn test_replay_rejects_history_over_capacity() {
        let clock = fixed_clock();
        let mut small = Activity::create(
            Uuid::new_v4(),
            "Choir",
            "",
            ActivityKind::Music,
            RosterConfig::with_capacity(1).unwrap(),
            Uuid::new_v4(),
            &clock,
        );
        let _ = small.enroll_participant("Alice", "", "", Uuid::new_v4(), &clock);
        let mut history = small.uncommitted_events().to_vec();
        history.push(history[1].clone());

        let result = Activity::replay(small.id, &history);

        match result.unwrap_err() {
            DomainError::Infrastructure(msg) => assert!(msg.contains("capacity 1")),
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }

    #[test]
    fn test_replay_of_empty_history_is_not_found() {
        let id = Uuid::new_v4();

        let result = Activity::replay(id, &[]);

        match result.unwrap_err() {
            DomainError::AggregateNotFound(found) => assert_eq!(found, id),
            other => panic!("expected AggregateNotFound, got {other:?}"),
        }
    }
}
