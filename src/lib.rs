//! Stockroom - Inventory Tracker Library
//!
//! A single-user product inventory with flat-file persistence and a
//! low-stock report.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
