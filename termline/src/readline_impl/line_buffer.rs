// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Where a [`LineBuffer::insert()`] landed. The redraw for each case is different.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// The cursor was at the end of the buffer.
    Appended,
    /// The cursor was somewhere before the end, so the tail moved right by one.
    BeforeEnd,
}

/// The in-progress line being edited, and its cursor.
///
/// The cursor is a character index (not a byte index, not a display column) and is
/// always in `0..=len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl From<&str> for LineBuffer {
    /// The cursor ends up at the end of the text.
    fn from(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }
}

impl LineBuffer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, ch: char) -> InsertPosition {
        let position = if self.cursor == self.chars.len() {
            InsertPosition::Appended
        } else {
            InsertPosition::BeforeEnd
        };
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
        position
    }

    /// Remove the character just before the cursor. Returns `false` (and changes nothing)
    /// when the cursor is already at the start.
    pub fn delete_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    /// Returns `false` when the cursor is already at the start.
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Returns `false` when the cursor is already at the end.
    pub fn move_right(&mut self) -> bool {
        if self.cursor == self.chars.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Swap in new contents, eg: a history entry. The cursor moves to the end.
    pub fn replace(&mut self, text: &str) { *self = Self::from(text); }
}

impl LineBuffer {
    #[must_use]
    pub fn len(&self) -> usize { self.chars.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.chars.is_empty() }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    /// Number of characters to the right of the cursor.
    #[must_use]
    pub fn chars_after_cursor(&self) -> usize { self.chars.len() - self.cursor }

    /// Everything from `index` to the end. An out of range `index` yields `""`.
    #[must_use]
    pub fn text_from(&self, index: usize) -> String {
        self.chars.get(index..).unwrap_or_default().iter().collect()
    }

    #[must_use]
    pub fn as_string(&self) -> String { self.chars.iter().collect() }
}
