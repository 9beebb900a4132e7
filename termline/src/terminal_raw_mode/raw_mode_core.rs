// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Platform agnostic raw mode capability: the [`RawModeDriver`] seam, and the
//! [`RawModeGuard`] RAII wrapper with its shareable [`RawModeReleaseHandle`].

use std::{fmt::Debug,
          sync::{Arc,
                 atomic::{AtomicBool, Ordering}}};

/// Switches a terminal between raw and canonical mode.
///
/// [`crate::PosixTerminalDriver`] talks to the real tty. [`crate::MockRawModeDriver`]
/// counts calls so tests can check that every acquisition is released exactly once.
pub trait RawModeDriver: Debug + Send + Sync {
    /// Is there a controlling terminal to put into raw mode?
    fn is_tty(&self) -> bool;

    /// # Errors
    ///
    /// Returns miette diagnostic errors if terminal attributes can't be read or set.
    fn enable_raw_mode(&self) -> miette::Result<()>;

    /// Must be safe to call when raw mode is not active (no-op).
    ///
    /// # Errors
    ///
    /// Returns miette diagnostic errors if terminal attributes can't be set.
    fn disable_raw_mode(&self) -> miette::Result<()>;
}

pub type SafeRawModeDriver = Arc<dyn RawModeDriver>;

/// Result of [`acquire_raw_mode()`].
#[derive(Debug)]
pub enum RawModeAcquisition {
    /// The terminal is in raw mode until the guard is released.
    Acquired(RawModeGuard),
    /// No controlling tty. Nothing was changed; degrade to plain line input.
    NoTty,
}

/// Put the terminal into raw mode, or report that there is no tty to do it on.
///
/// # Errors
///
/// Returns miette diagnostic errors if a tty is present but raw mode can't be enabled.
pub fn acquire_raw_mode(driver: SafeRawModeDriver) -> miette::Result<RawModeAcquisition> {
    if !driver.is_tty() {
        tracing::debug!(message = "No controlling tty, raw mode not acquired.");
        return Ok(RawModeAcquisition::NoTty);
    }

    driver.enable_raw_mode()?;
    tracing::debug!(message = "Raw mode acquired.");

    Ok(RawModeAcquisition::Acquired(RawModeGuard {
        release_handle: RawModeReleaseHandle {
            driver,
            released: Arc::new(AtomicBool::new(false)),
        },
    }))
}

/// Restores canonical mode on behalf of a [`RawModeGuard`]. Cheap to clone; every clone
/// shares the same "released" flag, so only the first release of a given acquisition
/// reaches the driver.
#[derive(Debug, Clone)]
pub struct RawModeReleaseHandle {
    driver: SafeRawModeDriver,
    released: Arc<AtomicBool>,
}

impl RawModeReleaseHandle {
    /// # Errors
    ///
    /// Returns miette diagnostic errors if the driver fails to restore the terminal.
    /// The acquisition still counts as released; it is not retried.
    pub fn release(&self) -> miette::Result<()> {
        if self.released.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        tracing::debug!(message = "Raw mode released.");
        self.driver.disable_raw_mode()
    }

    #[must_use]
    pub fn is_released(&self) -> bool { self.released.load(Ordering::SeqCst) }
}

/// RAII guard that restores canonical mode when dropped.
///
/// Also restores on [`Self::release()`] or through any [`RawModeReleaseHandle`] obtained
/// from [`Self::release_handle()`]. Restoration happens once, whichever path gets there
/// first.
#[derive(Debug)]
pub struct RawModeGuard {
    release_handle: RawModeReleaseHandle,
}

impl RawModeGuard {
    #[must_use]
    pub fn release_handle(&self) -> RawModeReleaseHandle { self.release_handle.clone() }

    /// # Errors
    ///
    /// See [`RawModeReleaseHandle::release()`].
    pub fn release(&self) -> miette::Result<()> { self.release_handle.release() }

    #[must_use]
    pub fn is_released(&self) -> bool { self.release_handle.is_released() }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(report) = self.release_handle.release() {
            // % is Display, ? is Debug.
            tracing::error!(
                message = "Failed to restore terminal from raw mode.",
                error = %report
            );
        }
    }
}
