//! Infrastructure layer providing external service integrations.
//!
//! This module contains the inventory file persistence and the
//! logging setup.

pub mod logger;
pub mod persistence;

pub use logger::*;
pub use persistence::*;
