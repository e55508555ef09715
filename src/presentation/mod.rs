//! Presentation layer handling the console menu and user input.
//!
//! This module renders the menu, product listings and reports, and
//! drives the prompt loop over any reader/writer pair.

pub mod menu;
pub mod input;

pub use menu::*;
pub use input::*;
