//! Creche Core — shared domain abstractions.
//!
//! Traits and types every bounded context of the creche engine builds on:
//! aggregates, events, commands, the clock, the event repository and the
//! domain error. No infrastructure code lives here.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod repository;
