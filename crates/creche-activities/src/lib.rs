//! Creche — Activities bounded context.
//!
//! Responsible for childcare activities and their participant rosters:
//! enrollment up to a fixed capacity, participant listings, simulated
//! parent notifications, and dietary compatibility checks delegated to a
//! pluggable `DietaryPolicy`.

pub mod application;
pub mod domain;
