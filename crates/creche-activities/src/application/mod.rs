//! Application services for the Activities context.

pub mod command_handlers;
pub mod query_handlers;
