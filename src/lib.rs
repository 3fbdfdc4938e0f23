// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. controller::Controller)
    clippy::module_name_repetitions
)]

//! # Jotpad
//!
//! A minimal terminal text editor: one text area, a Load button, a Save
//! button, and drag-and-drop of a file onto the window.
//!
//! ## Architecture
//!
//! Jotpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! File handling lives outside that loop in [`controller`], which talks to
//! the terminal through capability traits and is resumed with a
//! [`controller::Completion`] whenever a dialog closes or a read or write
//! finishes.
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`controller`]: Load/save policy and the session binding
//! - [`editor`]: The text area widget
//! - [`worker`]: Background file reads and writes
//! - [`dnd`]: Drag-and-drop payload parsing
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved default flags

pub mod app;
pub mod config;
pub mod controller;
pub mod dnd;
pub mod editor;
pub mod ui;
pub mod worker;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::controller::{Completion, Controller, FileError, Host, Session};
    pub use crate::editor::TextArea;
}
