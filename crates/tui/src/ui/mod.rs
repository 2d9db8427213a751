//! UI rendering module for the TUI application.
//!
//! Screen components, the shared layout, the theme and the runtime that
//! drives them.

pub mod components;
pub mod layout;
pub mod main_component;
pub mod runtime;
pub mod theme;
