// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal raw mode as a scoped capability.
//!
//! ## Raw Mode vs Cooked Mode
//!
//! **Cooked (canonical) mode** is the default: input is line buffered, the line
//! discipline echoes typed characters, and `Ctrl+C` becomes `SIGINT`.
//!
//! **Raw mode** hands every byte to the program as soon as it is typed, with no echo
//! and no signal generation. The line editor needs this to see arrow keys (which arrive
//! as `ESC [ A` etc.) and to draw the line itself.
//!
//! ## Acquisition and release
//!
//! [`acquire_raw_mode()`] asks a [`RawModeDriver`] to switch the tty into raw mode and
//! returns a [`RawModeGuard`]. Canonical mode comes back when the guard is dropped, when
//! [`RawModeGuard::release()`] is called, or when any [`RawModeReleaseHandle`] cloned
//! from it is released (the reader task holds one so it can restore the terminal before
//! terminating the process on `Ctrl+C`). Whichever of these happens first restores the
//! terminal; the rest are no-ops.
//!
//! When there is no tty at all (stdin or stdout redirected), acquisition does not fail.
//! It returns [`RawModeAcquisition::NoTty`] and the caller degrades to plain line input.
//!
//! ```no_run
//! use std::sync::Arc;
//! use termline::{PosixTerminalDriver, RawModeAcquisition, acquire_raw_mode};
//!
//! # fn main() -> miette::Result<()> {
//! match acquire_raw_mode(Arc::new(PosixTerminalDriver))? {
//!     RawModeAcquisition::Acquired(_guard) => {
//!         // Terminal is now in raw mode.
//!     } // Canonical mode restored when the guard is dropped.
//!     RawModeAcquisition::NoTty => { /* fall back to line input */ }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## `stty` equivalents
//!
//! ```bash
//! stty raw -echo icrnl   # roughly what PosixTerminalDriver::enable_raw_mode() does
//! stty sane              # roughly what disable_raw_mode() restores
//! ```

// Private modules (hide internal structure).
mod raw_mode_core;

#[cfg(unix)]
mod raw_mode_unix;

// Re-export the public API (flat, ergonomic surface).
pub use raw_mode_core::*;

#[cfg(unix)]
pub use raw_mode_unix::*;
