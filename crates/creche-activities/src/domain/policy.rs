//! Dietary policy seam.
//!
//! An activity never decides on its own whether a child can take part given
//! their dietary restriction. It hands its kind and roster to a
//! `DietaryPolicy`, which returns a `CompatibilityReport` and, on request, a
//! `RosterUpdate` listing remedies for the incompatible participants.

use serde::Serialize;

use super::kind::ActivityKind;
use super::participant::ParticipantRecord;

/// Whether one participant can take part as planned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompatibilityStatus {
    /// Nothing served conflicts with the child's restriction.
    Compatible,
    /// Something served conflicts with the child's restriction.
    Incompatible {
        /// What conflicts.
        reason: String,
    },
}

/// Verdict for the roster entry at `position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityVerdict {
    /// Roster index (enrollment order).
    pub position: usize,
    /// The child's name.
    pub child_name: String,
    /// The verdict.
    #[serde(flatten)]
    pub status: CompatibilityStatus,
}

impl CompatibilityVerdict {
    /// Whether this verdict needs a remedy.
    #[must_use]
    pub fn is_incompatible(&self) -> bool {
        matches!(self.status, CompatibilityStatus::Incompatible { .. })
    }
}

/// Verdicts for a whole roster, one per entry, in enrollment order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompatibilityReport {
    /// Per-participant verdicts.
    pub verdicts: Vec<CompatibilityVerdict>,
}

impl CompatibilityReport {
    /// Wraps a list of verdicts.
    #[must_use]
    pub fn new(verdicts: Vec<CompatibilityVerdict>) -> Self {
        Self { verdicts }
    }

    /// Verdicts that need a remedy.
    pub fn incompatible(&self) -> impl Iterator<Item = &CompatibilityVerdict> {
        self.verdicts.iter().filter(|v| v.is_incompatible())
    }

    /// True when no participant is incompatible.
    #[must_use]
    pub fn is_fully_compatible(&self) -> bool {
        self.incompatible().next().is_none()
    }
}

/// Action proposed for one incompatible participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RemedyAction {
    /// The child sits this activity out.
    Exclude,
    /// The child is served something else.
    SubstituteFood {
        /// What to serve instead.
        substitute: String,
    },
    /// Staff decide case by case.
    ManualReview {
        /// What staff need to look at.
        note: String,
    },
}

/// Remedy for the roster entry at `position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remedy {
    /// Roster index (enrollment order).
    pub position: usize,
    /// The child's name.
    pub child_name: String,
    /// What to do.
    #[serde(flatten)]
    pub action: RemedyAction,
}

/// Remedies a policy proposes. The roster itself is never rewritten; callers
/// act on the plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RosterUpdate {
    /// Proposed remedies, in roster order.
    pub remedies: Vec<Remedy>,
}

impl RosterUpdate {
    /// True when nothing needs to change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remedies.is_empty()
    }
}

/// Activity-specific dietary rules.
pub trait DietaryPolicy: Send + Sync {
    /// Judges every roster entry against what this activity serves.
    fn verify_compatibility(
        &self,
        kind: ActivityKind,
        roster: &[ParticipantRecord],
    ) -> CompatibilityReport;

    /// Proposes a remedy for each incompatible verdict in `report`.
    fn resolve_incompatibilities(
        &self,
        kind: ActivityKind,
        roster: &[ParticipantRecord],
        report: &CompatibilityReport,
    ) -> RosterUpdate;
}
