//! Creche event store — `EventRepository` implementations.

pub mod memory_event_repository;
