// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termline tcsetattr

//! # termline
//!
//! Raw mode line input for interactive command line tools. One call to
//! [`Readline::readline()`] produces one finalized line of text. While that call is in
//! flight:
//!
//! 1. The terminal is put into raw, no-echo mode through a [`RawModeGuard`]. The guard
//!    restores canonical mode exactly once, on every exit path.
//! 2. A reader task (see [`spawn_key_event_reader()`]) blocks on the tty, decodes raw
//!    bytes into [`KeyEvent`]s with [`decode_key_event()`], and publishes them in
//!    keystroke order on a [`tokio::sync::mpsc`] channel.
//! 3. The [`LineEditor`] drains that channel, owns the [`LineBuffer`] and its cursor,
//!    browses the [`History`] on up / down, and redraws the visible line with one atomic
//!    write per event.
//!
//! The caller only ever sees the committed [`String`]. What the line means (commands,
//! URLs, whatever) is not this crate's business.
//!
//! # Architecture overview, is message passing, was shared memory
//!
//! ```text
//! ┌──────────────────────────────┐   ReaderEvent (FIFO)   ┌─────────────────────────────┐
//! │ key_event_reader (blocking)  │ ─────────────────────▶ │ Readline::readline (async)  │
//! │ ByteSource → decode_key_event│                        │ LineEditor + History        │
//! └──────────────┬───────────────┘                        └──────────────┬──────────────┘
//!                │ Interrupt: restore tty, exit                          │ redraw
//!                ▼                                                       ▼
//!        RawModeReleaseHandle                                      OutputDevice
//! ```
//!
//! The reader only constructs and sends immutable [`KeyEvent`] values. The buffer, the
//! cursor, and the history are touched only by the task that drains the channel, so
//! there are no locks around them.
//!
//! # Degraded mode
//!
//! If there is no controlling tty (eg: `echo "get foo" | my_app`), raw mode is not
//! available. [`Readline::readline()`] then warns once and falls back to reading bytes
//! verbatim up to the next line feed, with no cursor editing and no history navigation.
//!
//! # Logging
//!
//! Use [`TracingConfig`] to send [`tracing`] output to a file while raw mode is active.
//! Writing logs to `stdout` while the line is being redrawn will garble the display.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod key_decoder;
pub mod log;
pub mod readline_impl;
pub mod terminal_io;
pub mod terminal_raw_mode;
pub mod test_fixtures;

// Re-export.
pub use key_decoder::*;
pub use log::*;
pub use readline_impl::*;
pub use terminal_io::*;
pub use terminal_raw_mode::*;
pub use test_fixtures::*;

// Type aliases.
use std::sync::Arc;

pub type StdMutex<T> = std::sync::Mutex<T>;

pub type SendRawTerminal = dyn std::io::Write + Send;
pub type SafeRawTerminal = Arc<StdMutex<SendRawTerminal>>;

pub type SendByteSource = dyn ByteSource;
pub type SafeByteSource = Arc<StdMutex<SendByteSource>>;

// Constants.
pub const HISTORY_SIZE_MAX: usize = 1_000;
pub const DEFAULT_PROMPT: &str = "> ";
/// Conventional exit code for a process terminated by `SIGINT` (128 + 2).
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// Flip this to `true` to trace every decoded keystroke and redraw.
pub const DEBUG_READLINE_MOD: bool = false;
