//! Application layer managing session state and workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! owning the inventory for a session and reporting command outcomes.

pub mod state;

pub use state::*;
