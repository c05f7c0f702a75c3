//! Line-oriented editing core.
//!
//! A [`LineBuffer`] of raw lines, a single [`Cursor`], prefix
//! [`transform`]ations for headings and blockquotes, and a
//! [`FocusReconciler`] that converges the rendering layer's surfaces with
//! the cursor after structural edits. [`Editor`] ties them together.

mod buffer;
mod controller;
mod cursor;
mod focus;
pub mod transform;

pub use buffer::{Line, LineBuffer, Merge, Split, SurfaceSlot};
pub use controller::{Editor, EditorSnapshot, GREETING};
pub use cursor::{Cursor, Horizontal, HorizontalMove, Landing, Vertical};
pub use focus::{
    EditableSurface, FocusReconciler, FocusRequest, PostAction, Resolved, SurfaceError,
    SurfaceRegistry, TickReport,
};
pub use transform::{Display, Margins, Rule, RuleKind, classify};
