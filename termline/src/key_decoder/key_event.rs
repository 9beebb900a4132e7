// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::AsRefStr;

/// One decoded keystroke. Produced once by the reader task, consumed once by the line
/// editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
pub enum KeyEvent {
    /// Always in the ASCII range `[32, 126]`.
    Printable(char),
    Enter,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// `Ctrl+C`. Handled by the reader itself; never reaches the line editor.
    Interrupt,
    /// A control byte, a high-bit byte, or an escape sequence this crate doesn't handle.
    Unrecognized(u8),
}
