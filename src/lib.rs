//! wsctl: manage workspace profiles from the terminal.
//!
//! The interesting part is [`tui`]: a responsive table that can be shown
//! statically or used as an interactive row picker.

pub mod config;
pub mod error;
pub mod format;
pub mod layout;
pub mod tui;
pub mod types;
pub mod workspace;
