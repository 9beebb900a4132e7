// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Unix/Linux/macOS implementation of raw mode using rustix's safe termios API.

use super::RawModeDriver;
use miette::miette;
use rustix::termios::{self, InputModes, OptionalActions, Termios};
use std::{io,
          sync::{LazyLock, Mutex}};

/// Stores the original terminal settings to restore later. There is one controlling
/// terminal per process, so this is process wide too.
static ORIGINAL_TERMIOS: LazyLock<Mutex<Option<Termios>>> =
    LazyLock::new(|| Mutex::new(None));

/// Drives the process' controlling terminal through `stdin`.
///
/// Keystrokes are read from `stdin` and the line is drawn on `stdout`, so both have to
/// be a tty for raw mode to make sense. If either is redirected, [`Self::is_tty()`]
/// reports `false` and the caller degrades to plain line input.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixTerminalDriver;

impl RawModeDriver for PosixTerminalDriver {
    fn is_tty(&self) -> bool {
        termios::isatty(io::stdin()) && termios::isatty(io::stdout())
    }

    /// Uses rustix's type-safe termios API to:
    /// 1. Save the original terminal settings for restoration (first call only).
    /// 2. Apply `make_raw()` (cfmakeraw): no canonical mode, no echo, no signal
    ///    generation, `VMIN=1`, `VTIME=0`.
    /// 3. Turn `ICRNL` back on, so the Enter key arrives as LF (10) and not CR (13).
    fn enable_raw_mode(&self) -> miette::Result<()> {
        let stdin = io::stdin();

        let mut termios = termios::tcgetattr(&stdin)
            .map_err(|e| miette!("failed to retrieve terminal attributes: {e}"))?;

        // Save original settings.
        {
            let mut original = ORIGINAL_TERMIOS
                .lock()
                .map_err(|e| miette!("terminal settings lock poisoned: {e}"))?;

            if original.is_none() {
                // rustix's Termios doesn't implement Copy, so we need to clone.
                *original = Some(termios.clone());
            }
        }

        termios.make_raw();
        termios.input_modes.insert(InputModes::ICRNL);

        termios::tcsetattr(&stdin, OptionalActions::Now, &termios)
            .map_err(|e| miette!("failed to set terminal attributes: {e}"))?;

        Ok(())
    }

    /// Restores the settings saved by [`Self::enable_raw_mode()`] and forgets them. No-op
    /// if raw mode is not active.
    fn disable_raw_mode(&self) -> miette::Result<()> {
        let maybe_original = ORIGINAL_TERMIOS
            .lock()
            .map_err(|e| miette!("terminal settings lock poisoned: {e}"))?
            .take();

        if let Some(termios) = maybe_original {
            termios::tcsetattr(io::stdin(), OptionalActions::Now, &termios)
                .map_err(|e| miette!("failed to set terminal attributes: {e}"))?;
        }

        Ok(())
    }
}
