// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns raw tty bytes into logical [`KeyEvent`]s.
//!
//! | Bytes                 | Event                          |
//! |-----------------------|--------------------------------|
//! | `0x0A` (LF)           | [`KeyEvent::Enter`]            |
//! | `0x7F` (DEL)          | [`KeyEvent::Backspace`]        |
//! | `0x03` (ETX, Ctrl+C)  | [`KeyEvent::Interrupt`]        |
//! | `ESC [ A` / `B`       | [`KeyEvent::ArrowUp`] / `Down` |
//! | `ESC [ C` / `D`       | [`KeyEvent::ArrowRight`] / `Left` |
//! | `0x20..=0x7E`         | [`KeyEvent::Printable`]        |
//! | anything else         | [`KeyEvent::Unrecognized`]     |

// Attach sources.
pub mod decoder;
pub mod key_event;

// Re-export.
pub use decoder::*;
pub use key_event::*;
