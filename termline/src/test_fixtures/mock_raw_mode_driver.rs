// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::RawModeDriver;
use miette::miette;
use std::sync::{Arc,
                atomic::{AtomicBool, AtomicUsize, Ordering}};

/// A [`RawModeDriver`] that never touches a real terminal. Clones share their counters,
/// so a test can hand one clone to the code under test and inspect the other.
#[derive(Debug, Clone)]
pub struct MockRawModeDriver {
    pub is_tty: bool,
    pub fail_enable: bool,
    pub is_raw: Arc<AtomicBool>,
    pub enable_count: Arc<AtomicUsize>,
    pub disable_count: Arc<AtomicUsize>,
}

impl Default for MockRawModeDriver {
    fn default() -> Self {
        Self {
            is_tty: true,
            fail_enable: false,
            is_raw: Arc::new(AtomicBool::new(false)),
            enable_count: Arc::new(AtomicUsize::new(0)),
            disable_count: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MockRawModeDriver {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn new_no_tty() -> Self {
        Self {
            is_tty: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn new_failing_enable() -> Self {
        Self {
            fail_enable: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn enable_count(&self) -> usize { self.enable_count.load(Ordering::SeqCst) }

    #[must_use]
    pub fn disable_count(&self) -> usize { self.disable_count.load(Ordering::SeqCst) }

    #[must_use]
    pub fn is_raw(&self) -> bool { self.is_raw.load(Ordering::SeqCst) }
}

impl RawModeDriver for MockRawModeDriver {
    fn is_tty(&self) -> bool { self.is_tty }

    fn enable_raw_mode(&self) -> miette::Result<()> {
        if self.fail_enable {
            return Err(miette!("mock terminal refused raw mode"));
        }
        self.enable_count.fetch_add(1, Ordering::SeqCst);
        self.is_raw.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn disable_raw_mode(&self) -> miette::Result<()> {
        self.disable_count.fetch_add(1, Ordering::SeqCst);
        self.is_raw.store(false, Ordering::SeqCst);
        Ok(())
    }
}
