//! Shared test mocks and utilities for the creche activity engine.

mod clock;
mod repository;

pub use clock::{FixedClock, fixed_clock};
pub use repository::{
    ConflictingEventRepository, EmptyEventRepository, FailingEventRepository,
    RecordingEventRepository,
};
