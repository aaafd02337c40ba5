//! Domain model for the Activities context.

pub mod aggregates;
pub mod commands;
pub mod config;
pub mod events;
pub mod kind;
pub mod participant;
pub mod policies;
pub mod policy;
pub mod reports;
