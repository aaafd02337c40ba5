//! Ready-made dietary policies.

use super::kind::ActivityKind;
use super::participant::ParticipantRecord;
use super::policy::{
    CompatibilityReport, CompatibilityStatus, CompatibilityVerdict, DietaryPolicy, Remedy,
    RemedyAction, RosterUpdate,
};

/// Policy for activities where no food is served: everyone can take part.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFoodServed;

impl DietaryPolicy for NoFoodServed {
    fn verify_compatibility(
        &self,
        _kind: ActivityKind,
        roster: &[ParticipantRecord],
    ) -> CompatibilityReport {
        CompatibilityReport::new(
            roster
                .iter()
                .enumerate()
                .map(|(position, p)| CompatibilityVerdict {
                    position,
                    child_name: p.child_name.clone(),
                    status: CompatibilityStatus::Compatible,
                })
                .collect(),
        )
    }

    fn resolve_incompatibilities(
        &self,
        _kind: ActivityKind,
        _roster: &[ParticipantRecord],
        _report: &CompatibilityReport,
    ) -> RosterUpdate {
        RosterUpdate::default()
    }
}

/// How `AllergenPolicy` handles an incompatible child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemedyStrategy {
    /// Keep the child out of the activity.
    Exclude,
    /// Serve the given food instead.
    Substitute(String),
    /// Flag the child for staff.
    ManualReview,
}

/// Policy for activities that serve known foods or allergens.
///
/// A child is incompatible when a served item and their restriction mention
/// each other, compared case-insensitively. Matching is substring based and
/// errs towards flagging.
#[derive(Debug, Clone)]
pub struct AllergenPolicy {
    served: Vec<String>,
    strategy: RemedyStrategy,
}

impl AllergenPolicy {
    /// Policy for an activity serving `served`.
    pub fn new<I, S>(served: I, strategy: RemedyStrategy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            served: served
                .into_iter()
                .map(|s| Into::<String>::into(s).trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            strategy,
        }
    }

    fn conflict(&self, participant: &ParticipantRecord) -> Option<&str> {
        if !participant.has_restriction() {
            return None;
        }
        let restriction = participant.dietary_restriction.trim().to_lowercase();
        self.served
            .iter()
            .find(|item| restriction.contains(item.as_str()) || item.contains(&restriction))
            .map(String::as_str)
    }
}

impl DietaryPolicy for AllergenPolicy {
    fn verify_compatibility(
        &self,
        _kind: ActivityKind,
        roster: &[ParticipantRecord],
    ) -> CompatibilityReport {
        CompatibilityReport::new(
            roster
                .iter()
                .enumerate()
                .map(|(position, p)| CompatibilityVerdict {
                    position,
                    child_name: p.child_name.clone(),
                    status: match self.conflict(p) {
                        Some(item) => CompatibilityStatus::Incompatible {
                            reason: format!("{item} is served"),
                        },
                        None => CompatibilityStatus::Compatible,
                    },
                })
                .collect(),
        )
    }

    fn resolve_incompatibilities(
        &self,
        _kind: ActivityKind,
        _roster: &[ParticipantRecord],
        report: &CompatibilityReport,
    ) -> RosterUpdate {
        let remedies = report
            .verdicts
            .iter()
            .filter_map(|verdict| {
                let CompatibilityStatus::Incompatible { reason } = &verdict.status else {
                    return None;
                };
                let action = match &self.strategy {
                    RemedyStrategy::Exclude => RemedyAction::Exclude,
                    RemedyStrategy::Substitute(food) => RemedyAction::SubstituteFood {
                        substitute: food.clone(),
                    },
                    RemedyStrategy::ManualReview => RemedyAction::ManualReview {
                        note: reason.clone(),
                    },
                };
                Some(Remedy {
                    position: verdict.position,
                    child_name: verdict.child_name.clone(),
                    action,
                })
            })
            .collect();
        RosterUpdate { remedies }
    }
}
