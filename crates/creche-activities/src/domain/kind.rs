//! Activity categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of labels classifying an activity. Carries no behaviour;
/// dietary policies may read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Painting, collage, modelling clay.
    ArtsAndCrafts,
    /// Baking and cooking workshops.
    Cooking,
    /// Singing and instruments.
    Music,
    /// Garden and park time.
    OutdoorPlay,
    /// Reading and storytelling circles.
    Storytelling,
    /// Games and motor skills.
    Sport,
}

impl ActivityKind {
    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ArtsAndCrafts => "Arts and crafts",
            Self::Cooking => "Cooking",
            Self::Music => "Music",
            Self::OutdoorPlay => "Outdoor play",
            Self::Storytelling => "Storytelling",
            Self::Sport => "Sport",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
