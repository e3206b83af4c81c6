//! Terminal table component.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: pure data types (Session, Event, Transition)
//! - `update`: pure transitions
//! - `view`: pure rendering
//! - `run`: effects (terminal, render thread, handoff)
//! - `prompt`: the tables the CLI shows

pub mod prompt;
pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
