use super::buffer::{LineBuffer, floor_char_boundary};

/// Logical caret position.
///
/// `column` is a byte offset into the raw text of `line` (indicator
/// included), always on a char boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based byte offset within the raw line text.
    pub column: usize,
}

/// Vertical movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

/// Horizontal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

/// Where the column lands after a vertical move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Start,
    End,
    PreserveColumn,
}

/// Outcome of [`Cursor::move_horizontal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalMove {
    /// The cursor crossed into the previous or next line.
    Crossed,
    /// At a line boundary, but there is no line to cross into.
    Blocked,
    /// Mid-line; the surface moves its own caret and reports back.
    Native,
}

impl Cursor {
    /// Cursor at a specific position.
    pub const fn at(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Unconditional set. Used when the surface reports its caret.
    pub const fn set_position(&mut self, line: usize, column: usize) {
        self.line = line;
        self.column = column;
    }

    /// Move one line up or down. Returns `false` (cursor unchanged) at the
    /// first/last line.
    pub fn move_vertical(&mut self, buffer: &LineBuffer, dir: Vertical, landing: Landing) -> bool {
        let target = match dir {
            Vertical::Up if self.line > 0 => self.line - 1,
            Vertical::Down if self.line < buffer.last_line() => self.line + 1,
            _ => return false,
        };
        let text = buffer.text_at(target).unwrap_or_default();
        self.column = match landing {
            Landing::Start => 0,
            Landing::End => text.len(),
            Landing::PreserveColumn => floor_char_boundary(text, self.column),
        };
        self.line = target;
        true
    }

    /// Horizontal motion. Only line-boundary crossings are handled here;
    /// anything else is left to the surface.
    pub fn move_horizontal(&mut self, buffer: &LineBuffer, dir: Horizontal) -> HorizontalMove {
        let crossing = match dir {
            Horizontal::Left if self.column == 0 => Some((Vertical::Up, Landing::End)),
            Horizontal::Right if self.column >= buffer.line_len(self.line) => {
                Some((Vertical::Down, Landing::Start))
            }
            _ => None,
        };
        match crossing {
            Some((vertical, landing)) => {
                if self.move_vertical(buffer, vertical, landing) {
                    HorizontalMove::Crossed
                } else {
                    HorizontalMove::Blocked
                }
            }
            None => HorizontalMove::Native,
        }
    }

    /// Clamp into the buffer: valid line, column within the line and on a
    /// char boundary.
    pub fn clamped(self, buffer: &LineBuffer) -> Self {
        let line = self.line.min(buffer.last_line());
        let text = buffer.text_at(line).unwrap_or_default();
        Self {
            line,
            column: floor_char_boundary(text, self.column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(lines: &[&str]) -> LineBuffer {
        LineBuffer::from_lines(lines.iter().copied())
    }

    // --- Vertical ---

    #[test]
    fn test_move_up_at_first_line_is_noop() {
        let b = buf(&["hello", "world"]);
        let mut c = Cursor::at(0, 3);
        assert!(!c.move_vertical(&b, Vertical::Up, Landing::PreserveColumn));
        assert_eq!(c, Cursor::at(0, 3));
    }

    #[test]
    fn test_move_down_at_last_line_is_noop() {
        let b = buf(&["hello", "world"]);
        let mut c = Cursor::at(1, 2);
        assert!(!c.move_vertical(&b, Vertical::Down, Landing::End));
        assert_eq!(c, Cursor::at(1, 2));
    }

    #[test]
    fn test_move_down_preserves_column() {
        let b = buf(&["hello", "world"]);
        let mut c = Cursor::at(0, 3);
        assert!(c.move_vertical(&b, Vertical::Down, Landing::PreserveColumn));
        assert_eq!(c, Cursor::at(1, 3));
    }

    #[test]
    fn test_move_up_clamps_to_shorter_line() {
        let b = buf(&["hi", "hello"]);
        let mut c = Cursor::at(1, 4);
        c.move_vertical(&b, Vertical::Up, Landing::PreserveColumn);
        assert_eq!(c, Cursor::at(0, 2));
    }

    #[test]
    fn test_move_down_clamps_to_char_boundary() {
        let b = buf(&["hello", "héllo"]);
        let mut c = Cursor::at(0, 2);
        c.move_vertical(&b, Vertical::Down, Landing::PreserveColumn);
        // byte 2 is inside 'é'
        assert_eq!(c, Cursor::at(1, 1));
    }

    #[test]
    fn test_landing_start_and_end() {
        let b = buf(&["abc", "defgh"]);
        let mut c = Cursor::at(0, 2);
        c.move_vertical(&b, Vertical::Down, Landing::End);
        assert_eq!(c, Cursor::at(1, 5));
        c.move_vertical(&b, Vertical::Up, Landing::Start);
        assert_eq!(c, Cursor::at(0, 0));
    }

    // --- Horizontal ---

    #[test]
    fn test_left_at_column_zero_crosses_to_end_of_previous_line() {
        let b = buf(&["hello", "world"]);
        let mut c = Cursor::at(1, 0);
        assert_eq!(c.move_horizontal(&b, Horizontal::Left), HorizontalMove::Crossed);
        assert_eq!(c, Cursor::at(0, 5));
    }

    #[test]
    fn test_right_at_end_crosses_to_start_of_next_line() {
        let b = buf(&["hello", "world"]);
        let mut c = Cursor::at(0, 5);
        assert_eq!(c.move_horizontal(&b, Horizontal::Right), HorizontalMove::Crossed);
        assert_eq!(c, Cursor::at(1, 0));
    }

    #[test]
    fn test_left_at_document_start_is_blocked() {
        let b = buf(&["hello"]);
        let mut c = Cursor::at(0, 0);
        assert_eq!(c.move_horizontal(&b, Horizontal::Left), HorizontalMove::Blocked);
        assert_eq!(c, Cursor::at(0, 0));
    }

    #[test]
    fn test_right_at_document_end_is_blocked() {
        let b = buf(&["hello"]);
        let mut c = Cursor::at(0, 5);
        assert_eq!(c.move_horizontal(&b, Horizontal::Right), HorizontalMove::Blocked);
        assert_eq!(c, Cursor::at(0, 5));
    }

    #[test]
    fn test_mid_line_motion_is_native() {
        let b = buf(&["hello"]);
        let mut c = Cursor::at(0, 2);
        assert_eq!(c.move_horizontal(&b, Horizontal::Left), HorizontalMove::Native);
        assert_eq!(c.move_horizontal(&b, Horizontal::Right), HorizontalMove::Native);
        assert_eq!(c, Cursor::at(0, 2));
    }

    // --- Clamp ---

    #[test]
    fn test_clamped_limits_line_and_column() {
        let b = buf(&["ab", "cd"]);
        assert_eq!(Cursor::at(9, 9).clamped(&b), Cursor::at(1, 2));
        assert_eq!(Cursor::at(0, 1).clamped(&b), Cursor::at(0, 1));
    }
}
