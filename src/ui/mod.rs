//! Terminal UI components.
//!
//! - [`surface`]: per-line editable surfaces and the table they are mounted in
//! - [`style`]: theming and colors
//! - [`inspector`]: debug overlay

pub mod inspector;
pub mod style;
pub mod surface;

mod render;

pub use render::{line_number_width, line_rows, render, split_editor_area};
pub use surface::{LineInput, NativeEdit, RowHit, SurfaceTable};
