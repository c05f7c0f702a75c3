use super::cursor::Cursor;

/// Opaque reference to a line's editable surface in the rendering layer.
///
/// The buffer hands out slot ids for new lines but never mounts or tears
/// down the surface behind one. A slot with nothing mounted is unbound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceSlot(u64);

impl SurfaceSlot {
    /// Raw id, for diagnostics.
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// One line of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    slot: SurfaceSlot,
}

impl Line {
    /// Raw text, including any markdown prefix.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Surface slot bound to this line.
    pub const fn slot(&self) -> SurfaceSlot {
        self.slot
    }
}

/// Result of [`LineBuffer::split`].
#[derive(Debug, Clone)]
pub struct Split {
    pub buffer: LineBuffer,
    pub cursor: Cursor,
}

/// Result of [`LineBuffer::merge`].
#[derive(Debug, Clone)]
pub struct Merge {
    pub buffer: LineBuffer,
    pub cursor: Cursor,
    /// Byte length of the text appended to the previous line.
    pub appended_len: usize,
}

/// Ordered sequence of lines. Never empty.
///
/// Content edits happen in place. Structural edits ([`split`](Self::split),
/// [`merge`](Self::merge)) leave `self` untouched and return a new buffer,
/// so anything still holding the old one keeps a consistent view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<Line>,
    next_slot: u64,
}

impl LineBuffer {
    /// Build a buffer from individual line texts. An empty iterator yields
    /// a single empty line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut buffer = Self {
            lines: Vec::new(),
            next_slot: 0,
        };
        for text in lines {
            let slot = buffer.allocate_slot();
            buffer.lines.push(Line {
                text: text.into(),
                slot,
            });
        }
        if buffer.lines.is_empty() {
            let slot = buffer.allocate_slot();
            buffer.lines.push(Line {
                text: String::new(),
                slot,
            });
        }
        buffer
    }

    /// Build a buffer by splitting `text` on newlines (`\r\n` tolerated).
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(
            text.split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line)),
        )
    }

    /// An empty document: one empty line.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Number of lines (always at least one).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the last line.
    pub fn last_line(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Raw text of a line.
    pub fn text_at(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(Line::text)
    }

    /// Byte length of a line, 0 when out of range.
    pub fn line_len(&self, idx: usize) -> usize {
        self.text_at(idx).map_or(0, str::len)
    }

    /// The whole document joined with `\n`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace the text of `line`. Returns `false` (and does nothing) when
    /// `line` is out of range.
    pub fn edit(&mut self, line: usize, text: impl Into<String>) -> bool {
        let Some(target) = self.lines.get_mut(line) else {
            tracing::warn!(line, len = self.lines.len(), "edit ignored: line out of range");
            return false;
        };
        target.text = text.into();
        true
    }

    /// Split `line` at byte `column`: the head stays, the tail becomes a new
    /// line right after it. The cursor lands at the start of the new line.
    pub fn split(&self, line: usize, column: usize) -> Option<Split> {
        let Some(current) = self.lines.get(line) else {
            tracing::warn!(line, len = self.lines.len(), "split ignored: line out of range");
            return None;
        };
        let at = floor_char_boundary(&current.text, column);
        let (head, tail) = current.text.split_at(at);
        let (head, tail) = (head.to_string(), tail.to_string());

        let mut next = self.clone();
        next.lines[line].text = head;
        next.insert_line(line + 1, tail);
        tracing::debug!(line, column = at, lines = next.len(), "split line");
        Some(Split {
            buffer: next,
            cursor: Cursor::at(line + 1, 0),
        })
    }

    /// Append `line` to the previous line and remove it. The first line can
    /// never be merged upward.
    pub fn merge(&self, line: usize) -> Option<Merge> {
        if line == 0 || line >= self.lines.len() {
            tracing::debug!(line, len = self.lines.len(), "merge ignored");
            return None;
        }
        let mut next = self.clone();
        let removed = next.lines.remove(line);
        let previous = &mut next.lines[line - 1];
        let boundary = previous.text.len();
        previous.text.push_str(&removed.text);
        tracing::debug!(
            line,
            boundary,
            appended = removed.text.len(),
            lines = next.len(),
            "merged line into previous"
        );
        Some(Merge {
            buffer: next,
            cursor: Cursor::at(line - 1, boundary),
            appended_len: removed.text.len(),
        })
    }

    fn insert_line(&mut self, at: usize, text: String) {
        let slot = self.allocate_slot();
        let at = at.min(self.lines.len());
        self.lines.insert(at, Line { text, slot });
    }

    const fn allocate_slot(&mut self) -> SurfaceSlot {
        let slot = SurfaceSlot(self.next_slot);
        self.next_slot += 1;
        slot
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

/// Largest char boundary in `text` that is `<= column`.
pub(crate) fn floor_char_boundary(text: &str, column: usize) -> usize {
    let mut at = column.min(text.len());
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}
