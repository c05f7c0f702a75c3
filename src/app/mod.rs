//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering and focus reconciliation

mod event_loop;
mod input;
mod model;
mod update;

pub use input::handle_event;
pub use model::Model;
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug, Default)]
pub struct App {
    source_path: Option<PathBuf>,
    initial_text: Option<String>,
    inspector_visible: bool,
}

impl App {
    /// Create an application over the greeting buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the buffer with `text`, read from `path`.
    #[must_use]
    pub fn with_source(mut self, path: PathBuf, text: String) -> Self {
        self.source_path = Some(path);
        self.initial_text = Some(text);
        self
    }

    /// Set initial inspector visibility.
    #[must_use]
    pub const fn with_inspector(mut self, visible: bool) -> Self {
        self.inspector_visible = visible;
        self
    }
}
