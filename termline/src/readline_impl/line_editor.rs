// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEBUG_READLINE_MOD, History, InsertPosition, KeyEvent, LineBuffer};
use crossterm::{QueueableCommand, cursor,
                style::Print,
                terminal::{Clear, ClearType}};
use std::io::{self, Write};

/// Result of feeding one [`KeyEvent`] to a [`LineEditor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Editing,
    /// Enter was pressed. Holds the finished line.
    Committed(String),
}

/// The terminal update that follows from one event. [`LineEditor::paint()`] turns this
/// into escape sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redraw {
    /// The event changed nothing on screen.
    Nothing,
    /// Character appended at the end of the line.
    Echo(char),
    /// Character inserted mid line: print the tail from the insertion point, then walk
    /// the cursor back over everything after the inserted character.
    ReprintTail { tail: String, move_left_by: usize },
    CursorLeft,
    CursorRight,
    /// Clear the whole row and print the prompt and the buffer again.
    FullLine,
    /// Line committed: move to a fresh output line.
    NewLine,
}

/// Owns the in-progress [`LineBuffer`] for a single readline session and applies key
/// events to it.
///
/// Every event produces at most one write to the terminal (the escape sequences for a
/// redraw are assembled into a frame first). This keeps the visible line consistent
/// even if other output lands between two events.
#[derive(Debug)]
pub struct LineEditor {
    pub prompt: String,
    pub line_buffer: LineBuffer,
}

impl LineEditor {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            line_buffer: LineBuffer::new(),
        }
    }

    /// Print the prompt at the start of a session.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to, or flushing, the terminal fails.
    pub fn render_prompt(&self, term: &mut dyn Write) -> io::Result<()> {
        let mut frame = Vec::new();
        frame.queue(Print(&self.prompt))?;
        write_frame(term, &frame)
    }

    /// Apply `event` to the buffer (and `history` for up / down), then write the matching
    /// redraw to `term` in one go.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to, or flushing, the terminal fails. The buffer has
    /// already been updated when that happens.
    pub fn apply_event_and_render(
        &mut self,
        event: KeyEvent,
        history: &mut History,
        term: &mut dyn Write,
    ) -> io::Result<EditorState> {
        let (state, redraw) = self.apply_event(event, history);

        DEBUG_READLINE_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::trace!(
                message = "LineEditor::apply_event_and_render",
                event = ?event,
                redraw = ?redraw,
                cursor = %self.line_buffer.cursor()
            );
        });

        let mut frame = Vec::new();
        self.paint(&redraw, &mut frame)?;
        write_frame(term, &frame)?;

        Ok(state)
    }

    /// Update the buffer and history for `event`, without touching the terminal.
    pub fn apply_event(
        &mut self,
        event: KeyEvent,
        history: &mut History,
    ) -> (EditorState, Redraw) {
        use apply_event_helper::{handle_backspace, handle_char, handle_down,
                                 handle_enter, handle_left, handle_right, handle_up};

        match event {
            KeyEvent::Printable(ch) => (EditorState::Editing, handle_char(self, ch)),
            KeyEvent::Backspace => (EditorState::Editing, handle_backspace(self)),
            KeyEvent::ArrowLeft => (EditorState::Editing, handle_left(self)),
            KeyEvent::ArrowRight => (EditorState::Editing, handle_right(self)),
            KeyEvent::ArrowUp => (EditorState::Editing, handle_up(self, history)),
            KeyEvent::ArrowDown => (EditorState::Editing, handle_down(self, history)),
            KeyEvent::Enter => handle_enter(self),
            // Interrupt is handled by the reader before it gets here.
            KeyEvent::Interrupt | KeyEvent::Unrecognized(_) => {
                (EditorState::Editing, Redraw::Nothing)
            }
        }
    }

    /// Queue the escape sequences for `redraw` into `frame`. Nothing is written for
    /// [`Redraw::Nothing`], and a zero column cursor move is never emitted.
    ///
    /// # Errors
    ///
    /// Only if queueing into `frame` fails.
    pub fn paint(&self, redraw: &Redraw, frame: &mut Vec<u8>) -> io::Result<()> {
        match redraw {
            Redraw::Nothing => {}
            Redraw::Echo(ch) => {
                frame.queue(Print(ch))?;
            }
            Redraw::ReprintTail { tail, move_left_by } => {
                frame.queue(Print(tail))?;
                queue_move_left(frame, *move_left_by)?;
            }
            Redraw::CursorLeft => {
                frame.queue(cursor::MoveLeft(1))?;
            }
            Redraw::CursorRight => {
                frame.queue(cursor::MoveRight(1))?;
            }
            Redraw::FullLine => {
                frame
                    .queue(Clear(ClearType::CurrentLine))?
                    .queue(cursor::MoveToColumn(0))?
                    .queue(Print(&self.prompt))?
                    .queue(Print(self.line_buffer.as_string()))?;
                queue_move_left(frame, self.line_buffer.chars_after_cursor())?;
            }
            Redraw::NewLine => {
                frame.queue(Print("\r\n"))?;
            }
        }
        Ok(())
    }
}

mod apply_event_helper {
    use super::{EditorState, History, InsertPosition, LineEditor, Redraw};

    pub fn handle_char(editor: &mut LineEditor, ch: char) -> Redraw {
        let buffer = &mut editor.line_buffer;
        let insert_at = buffer.cursor();
        match buffer.insert(ch) {
            InsertPosition::Appended => Redraw::Echo(ch),
            InsertPosition::BeforeEnd => Redraw::ReprintTail {
                tail: buffer.text_from(insert_at),
                move_left_by: buffer.chars_after_cursor(),
            },
        }
    }

    pub fn handle_backspace(editor: &mut LineEditor) -> Redraw {
        if editor.line_buffer.delete_before_cursor() {
            Redraw::FullLine
        } else {
            Redraw::Nothing
        }
    }

    pub fn handle_left(editor: &mut LineEditor) -> Redraw {
        if editor.line_buffer.move_left() {
            Redraw::CursorLeft
        } else {
            Redraw::Nothing
        }
    }

    pub fn handle_right(editor: &mut LineEditor) -> Redraw {
        if editor.line_buffer.move_right() {
            Redraw::CursorRight
        } else {
            Redraw::Nothing
        }
    }

    // Up and down always replace the buffer. With no history, or past the newest
    // entry, the replacement is an empty line.
    pub fn handle_up(editor: &mut LineEditor, history: &mut History) -> Redraw {
        editor.line_buffer.replace(history.previous());
        Redraw::FullLine
    }

    pub fn handle_down(editor: &mut LineEditor, history: &mut History) -> Redraw {
        editor.line_buffer.replace(history.next());
        Redraw::FullLine
    }

    pub fn handle_enter(editor: &mut LineEditor) -> (EditorState, Redraw) {
        let line = editor.line_buffer.as_string();
        (EditorState::Committed(line), Redraw::NewLine)
    }
}

fn queue_move_left(frame: &mut Vec<u8>, columns: usize) -> io::Result<()> {
    if columns == 0 {
        return Ok(());
    }
    let columns = u16::try_from(columns).unwrap_or(u16::MAX);
    frame.queue(cursor::MoveLeft(columns))?;
    Ok(())
}

fn write_frame(term: &mut dyn Write, frame: &[u8]) -> io::Result<()> {
    if frame.is_empty() {
        return Ok(());
    }
    term.write_all(frame)?;
    term.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HISTORY_SIZE_MAX, StdoutMock};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    const CLEAR_LINE: &str = "\x1b[2K";
    const COLUMN_ONE: &str = "\x1b[1G";

    fn feed(
        editor: &mut LineEditor,
        history: &mut History,
        stdout_mock: &mut StdoutMock,
        events: &[KeyEvent],
    ) -> EditorState {
        let mut state = EditorState::Editing;
        for event in events {
            state = editor
                .apply_event_and_render(*event, history, stdout_mock)
                .unwrap();
        }
        state
    }

    fn type_text(text: &str) -> Vec<KeyEvent> { text.chars().map(KeyEvent::Printable).collect() }

    #[test]
    fn test_type_and_commit() {
        let mut editor = LineEditor::new("> ");
        let mut history = History::new();
        let mut stdout_mock = StdoutMock::default();

        let mut events = type_text("get");
        events.push(KeyEvent::Enter);
        let state = feed(&mut editor, &mut history, &mut stdout_mock, &events);

        assert_eq!(state, EditorState::Committed("get".into()));
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "get\r\n");
        // Committing is the session's job; the editor never appends to history.
        assert!(history.is_empty());
    }

    #[test]
    fn test_render_prompt() {
        let editor = LineEditor::new("$ ");
        let mut stdout_mock = StdoutMock::default();
        editor.render_prompt(&mut stdout_mock).unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "$ ");
        assert_eq!(stdout_mock.get_write_count(), 1);
    }

    #[test]
    fn test_insert_mid_line_reprints_tail() {
        let mut editor = LineEditor::new("> ");
        let mut history = History::new();
        let mut stdout_mock = StdoutMock::default();

        let mut events = type_text("ac");
        events.push(KeyEvent::ArrowLeft);
        feed(&mut editor, &mut history, &mut stdout_mock, &events);
        stdout_mock.clear();

        feed(&mut editor, &mut history, &mut stdout_mock, &[KeyEvent::Printable('b')]);
        assert_eq!(editor.line_buffer.as_string(), "abc");
        assert_eq!(editor.line_buffer.cursor(), 2);
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "bc\x1b[1D");
    }

    #[test]
    fn test_cursor_moves_emit_single_column_steps() {
        let mut editor = LineEditor::new("> ");
        let mut history = History::new();
        let mut stdout_mock = StdoutMock::default();

        feed(&mut editor, &mut history, &mut stdout_mock, &type_text("ab"));
        stdout_mock.clear();

        feed(
            &mut editor,
            &mut history,
            &mut stdout_mock,
            &[KeyEvent::ArrowLeft, KeyEvent::ArrowRight],
        );
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "\x1b[1D\x1b[1C");
    }

    #[test_case(KeyEvent::ArrowLeft ; "left at start")]
    #[test_case(KeyEvent::Backspace ; "backspace at start")]
    #[test_case(KeyEvent::ArrowRight ; "right at end")]
    #[test_case(KeyEvent::Unrecognized(0x01) ; "unrecognized")]
    #[test_case(KeyEvent::Interrupt ; "interrupt")]
    fn test_noop_events_write_nothing(event: KeyEvent) {
        let mut editor = LineEditor::new("> ");
        let mut history = History::new();
        let mut stdout_mock = StdoutMock::default();

        let state = feed(&mut editor, &mut history, &mut stdout_mock, &[event]);

        assert_eq!(state, EditorState::Editing);
        assert!(editor.line_buffer.is_empty());
        assert_eq!(stdout_mock.get_write_count(), 0);
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "");
    }

    #[test_case(KeyEvent::ArrowUp ; "up")]
    #[test_case(KeyEvent::ArrowDown ; "down")]
    fn test_arrow_with_no_history_clears_line(event: KeyEvent) {
        let mut editor = LineEditor::new("> ");
        let mut history = History::new();
        let mut stdout_mock = StdoutMock::default();

        feed(&mut editor, &mut history, &mut stdout_mock, &type_text("abc"));
        stdout_mock.clear();
        let write_count_before = stdout_mock.get_write_count();

        let state = feed(&mut editor, &mut history, &mut stdout_mock, &[event]);

        assert_eq!(state, EditorState::Editing);
        assert_eq!(editor.line_buffer.as_string(), "");
        assert_eq!(editor.line_buffer.cursor(), 0);
        assert_eq!(stdout_mock.get_write_count(), write_count_before + 1);
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            format!("{CLEAR_LINE}{COLUMN_ONE}> ")
        );
        assert!(history.is_empty());
    }

    #[test]
    fn test_backspace_mid_line_redraws_full_line() {
        let mut editor = LineEditor::new("> ");
        let mut history = History::new();
        let mut stdout_mock = StdoutMock::default();

        let mut events = type_text("abcd");
        events.extend([KeyEvent::ArrowLeft, KeyEvent::ArrowLeft]);
        feed(&mut editor, &mut history, &mut stdout_mock, &events);
        stdout_mock.clear();

        feed(&mut editor, &mut history, &mut stdout_mock, &[KeyEvent::Backspace]);
        assert_eq!(editor.line_buffer.as_string(), "acd");
        assert_eq!(editor.line_buffer.cursor(), 1);
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            format!("{CLEAR_LINE}{COLUMN_ONE}> acd\x1b[2D")
        );
        assert_eq!(stdout_mock.get_write_count(), 1);
    }

    #[test]
    fn test_backspace_at_end_does_not_move_left_zero() {
        let mut editor = LineEditor::new("> ");
        let mut history = History::new();
        let mut stdout_mock = StdoutMock::default();

        feed(&mut editor, &mut history, &mut stdout_mock, &type_text("ab"));
        stdout_mock.clear();

        feed(&mut editor, &mut history, &mut stdout_mock, &[KeyEvent::Backspace]);
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            format!("{CLEAR_LINE}{COLUMN_ONE}> a")
        );
    }

    #[test]
    fn test_history_browse_and_return_to_fresh_line() {
        let mut editor = LineEditor::new("> ");
        let mut history = History::from_entries(HISTORY_SIZE_MAX, ["one", "two"]);
        let mut stdout_mock = StdoutMock::default();

        feed(&mut editor, &mut history, &mut stdout_mock, &[KeyEvent::ArrowUp]);
        assert_eq!(editor.line_buffer.as_string(), "two");
        assert_eq!(editor.line_buffer.cursor(), 3);
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string_strip_ansi(),
            "> two"
        );

        feed(
            &mut editor,
            &mut history,
            &mut stdout_mock,
            &[KeyEvent::ArrowUp, KeyEvent::ArrowUp],
        );
        assert_eq!(editor.line_buffer.as_string(), "one");

        feed(&mut editor, &mut history, &mut stdout_mock, &[KeyEvent::ArrowDown]);
        assert_eq!(editor.line_buffer.as_string(), "two");

        feed(&mut editor, &mut history, &mut stdout_mock, &[KeyEvent::ArrowDown]);
        assert!(editor.line_buffer.is_empty());
        assert!(!history.is_browsing());
    }

    #[test]
    fn test_typing_over_recalled_entry_commits_edited_text() {
        let mut editor = LineEditor::new("> ");
        let mut history = History::from_entries(HISTORY_SIZE_MAX, ["get"]);
        let mut stdout_mock = StdoutMock::default();

        let mut events = vec![KeyEvent::ArrowUp, KeyEvent::Backspace];
        events.extend(type_text("t x"));
        events.push(KeyEvent::Enter);
        let state = feed(&mut editor, &mut history, &mut stdout_mock, &events);

        assert_eq!(state, EditorState::Committed("get x".into()));
        assert_eq!(history.entries().collect::<Vec<_>>(), vec!["get"]);
    }

    #[test]
    fn test_one_write_per_visible_event() {
        let mut editor = LineEditor::new("> ");
        let mut history = History::from_entries(HISTORY_SIZE_MAX, ["x"]);
        let mut stdout_mock = StdoutMock::default();

        let events = [
            KeyEvent::Printable('a'),
            KeyEvent::ArrowLeft,
            KeyEvent::Printable('b'),
            KeyEvent::Backspace,
            KeyEvent::ArrowUp,
            KeyEvent::Enter,
        ];
        feed(&mut editor, &mut history, &mut stdout_mock, &events);
        assert_eq!(stdout_mock.get_write_count(), events.len());
    }
}
