// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorSnapshot)
    clippy::module_name_repetitions
)]

//! # Linemark
//!
//! A line-oriented markdown editor for the terminal.
//!
//! Every line is edited on its own surface. Lines starting with a heading
//! (`# ` .. `###### `) or blockquote (`> `) marker are shown styled with the
//! marker hidden, except on the line holding the cursor.
//!
//! ## Architecture
//!
//! Linemark uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal, mounting one surface per line
//!
//! Structural edits (splitting and merging lines) create and remove
//! surfaces, which only exist after the next draw. Focus for the new line
//! is queued and retried after each draw until the surface is there.
//!
//! ## Modules
//!
//! - [`editor`]: Line buffer, cursor, transformations and focus queue
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Flag-file configuration

pub mod app;
pub mod config;
pub mod editor;
pub mod ui;
