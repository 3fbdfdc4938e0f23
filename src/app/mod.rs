//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! File operations are not part of the model. After each update the
//! message is offered to the [`Controller`](crate::controller::Controller),
//! which reaches the screen and the disk through the shell host adapter.

pub mod dialog;
mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::Model;
pub use update::{Message, update};

use std::path::PathBuf;

use crate::editor::DEFAULT_TAB_WIDTH;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    mouse_enabled: bool,
    tab_width: usize,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    pub const fn new() -> Self {
        Self {
            mouse_enabled: true,
            tab_width: DEFAULT_TAB_WIDTH,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Enable or disable mouse capture.
    pub const fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Columns per tab stop in the editor.
    pub const fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
