//! Per-line input surfaces.
//!
//! The terminal has no widgets of its own, so each line gets a
//! [`LineInput`]: a caret and selection over the line's raw text with the
//! usual native behaviours (caret motion, insert, delete). Surfaces are
//! mounted by the renderer into a [`SurfaceTable`] keyed by
//! [`SurfaceSlot`]; a line split off since the last frame has no surface
//! until the next draw.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use unicode_width::UnicodeWidthChar;

use crate::editor::{EditableSurface, Line, SurfaceError, SurfaceRegistry, SurfaceSlot};

/// Text change produced by native input on a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeEdit {
    pub text: String,
    pub caret: usize,
}

/// Editable surface for one line.
#[derive(Debug, Clone)]
pub struct LineInput {
    slot: SurfaceSlot,
    text: String,
    anchor: usize,
    caret: usize,
    active: Rc<Cell<Option<SurfaceSlot>>>,
}

impl LineInput {
    fn new(slot: SurfaceSlot, text: &str, active: Rc<Cell<Option<SurfaceSlot>>>) -> Self {
        Self {
            slot,
            text: text.to_string(),
            anchor: 0,
            caret: 0,
            active,
        }
    }

    /// An input over `text` that is not mounted in any table, with the
    /// caret at `caret`. Used for keys that arrive before the cursor line's
    /// surface has focus.
    pub fn detached(slot: SurfaceSlot, text: &str, caret: usize) -> Self {
        let mut input = Self::new(slot, text, Rc::default());
        input.collapse(floor_boundary(text, caret));
        input
    }

    pub const fn slot(&self) -> SurfaceSlot {
        self.slot
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_focused(&self) -> bool {
        self.active.get() == Some(self.slot)
    }

    /// Pick up the line's current text; the caret is kept when still valid.
    fn sync(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
        }
        self.caret = floor_boundary(&self.text, self.caret);
        self.anchor = floor_boundary(&self.text, self.anchor);
    }

    fn collapse(&mut self, at: usize) {
        self.caret = at;
        self.anchor = at;
    }

    /// One char left. Returns the new caret, or `None` at column 0.
    pub fn move_left(&mut self) -> Option<usize> {
        let prev = prev_boundary(&self.text, self.caret)?;
        self.collapse(prev);
        Some(prev)
    }

    /// One char right. Returns the new caret, or `None` at the end.
    pub fn move_right(&mut self) -> Option<usize> {
        let next = next_boundary(&self.text, self.caret)?;
        self.collapse(next);
        Some(next)
    }

    pub fn move_home(&mut self) -> usize {
        self.collapse(0);
        0
    }

    pub fn move_end(&mut self) -> usize {
        let end = self.text.len();
        self.collapse(end);
        end
    }

    /// Place the caret from a click at display column `col` of the shown
    /// text, which starts `hidden` bytes into the raw text.
    pub fn click(&mut self, hidden: usize, col: usize) -> usize {
        let shown = self.text.get(hidden..).unwrap_or_default();
        let caret = hidden + byte_offset_for_column(shown, col);
        self.focus();
        self.collapse(caret);
        caret
    }

    /// Insert `ch` over the selection.
    pub fn insert_char(&mut self, ch: char) -> NativeEdit {
        let (start, end) = self.ordered();
        self.text.replace_range(start..end, ch.encode_utf8(&mut [0; 4]));
        self.collapse(start + ch.len_utf8());
        self.edit()
    }

    /// Delete the selection or the char before the caret. `None` at
    /// column 0 with nothing selected.
    pub fn backspace(&mut self) -> Option<NativeEdit> {
        let (start, end) = self.ordered();
        let start = if start == end {
            prev_boundary(&self.text, start)?
        } else {
            start
        };
        self.text.replace_range(start..end, "");
        self.collapse(start);
        Some(self.edit())
    }

    /// Delete the selection or the char after the caret. `None` at the end
    /// of the line with nothing selected.
    pub fn delete_forward(&mut self) -> Option<NativeEdit> {
        let (start, end) = self.ordered();
        let end = if start == end {
            next_boundary(&self.text, end)?
        } else {
            end
        };
        self.text.replace_range(start..end, "");
        self.collapse(start);
        Some(self.edit())
    }

    fn ordered(&self) -> (usize, usize) {
        (self.anchor.min(self.caret), self.anchor.max(self.caret))
    }

    fn edit(&self) -> NativeEdit {
        NativeEdit {
            text: self.text.clone(),
            caret: self.caret,
        }
    }
}

impl EditableSurface for LineInput {
    fn focus(&mut self) {
        self.active.set(Some(self.slot));
    }

    fn selection(&self) -> (usize, usize) {
        self.ordered()
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        self.anchor = floor_boundary(&self.text, start);
        self.caret = floor_boundary(&self.text, end);
    }
}

/// Screen position of one rendered line, recorded during draw for mouse
/// hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHit {
    pub y: u16,
    /// First column of the displayed text.
    pub x: u16,
    pub line: usize,
    pub slot: SurfaceSlot,
    /// Raw bytes hidden in front of the displayed text.
    pub hidden: usize,
}

/// All mounted surfaces. Mutated only by the renderer and by native input
/// on a surface.
#[derive(Debug, Default)]
pub struct SurfaceTable {
    surfaces: HashMap<SurfaceSlot, LineInput>,
    active: Rc<Cell<Option<SurfaceSlot>>>,
    rows: Vec<RowHit>,
}

impl SurfaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a surface for every line and tear down surfaces whose lines
    /// are gone.
    pub fn mount(&mut self, lines: &[Line]) {
        let live: HashMap<SurfaceSlot, &str> =
            lines.iter().map(|l| (l.slot(), l.text())).collect();
        self.surfaces.retain(|slot, _| live.contains_key(slot));
        if self
            .active
            .get()
            .is_some_and(|slot| !live.contains_key(&slot))
        {
            self.active.set(None);
        }
        for (slot, text) in live {
            self.surfaces
                .entry(slot)
                .and_modify(|s| s.sync(text))
                .or_insert_with(|| LineInput::new(slot, text, Rc::clone(&self.active)));
        }
    }

    pub fn get(&self, slot: SurfaceSlot) -> Option<&LineInput> {
        self.surfaces.get(&slot)
    }

    pub fn get_mut(&mut self, slot: SurfaceSlot) -> Option<&mut LineInput> {
        self.surfaces.get_mut(&slot)
    }

    pub fn is_mounted(&self, slot: SurfaceSlot) -> bool {
        self.surfaces.contains_key(&slot)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Slot of the surface holding input focus.
    pub fn focused_slot(&self) -> Option<SurfaceSlot> {
        self.active.get()
    }

    pub fn focused(&self) -> Option<&LineInput> {
        self.active.get().and_then(|slot| self.surfaces.get(&slot))
    }

    pub fn focused_mut(&mut self) -> Option<&mut LineInput> {
        self.active
            .get()
            .and_then(|slot| self.surfaces.get_mut(&slot))
    }

    /// Replace the hit-test rows for the frame just drawn.
    pub fn set_rows(&mut self, rows: Vec<RowHit>) {
        self.rows = rows;
    }

    pub fn row_at(&self, y: u16) -> Option<RowHit> {
        self.rows.iter().copied().find(|row| row.y == y)
    }
}

impl SurfaceRegistry for SurfaceTable {
    fn resolve(&mut self, slot: SurfaceSlot) -> Result<&mut dyn EditableSurface, SurfaceError> {
        self.surfaces
            .get_mut(&slot)
            .map(|surface| surface as &mut dyn EditableSurface)
            .ok_or(SurfaceError::Unmounted(slot))
    }
}

fn floor_boundary(text: &str, at: usize) -> usize {
    let mut at = at.min(text.len());
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}

fn prev_boundary(text: &str, at: usize) -> Option<usize> {
    text.get(..at)?
        .char_indices()
        .next_back()
        .map(|(idx, _)| idx)
}

fn next_boundary(text: &str, at: usize) -> Option<usize> {
    text.get(at..)?
        .chars()
        .next()
        .map(|ch| at + ch.len_utf8())
}

/// Byte offset in `text` for display column `col`. Clicks on the right
/// half of a wide char land after it.
fn byte_offset_for_column(text: &str, col: usize) -> usize {
    let mut width = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if col < width + w.div_ceil(2).max(1) {
            return idx;
        }
        width += w;
    }
    text.len()
}
