// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::HISTORY_SIZE_MAX;
use std::collections::VecDeque;

/// Previously committed lines, oldest first, plus a navigation index used by up / down.
///
/// `nav_index` is always in `0..=len()`. `nav_index == len()` means "not browsing,
/// editing a fresh line". Navigation never changes the entries; only [`Self::append()`]
/// (and the bulk helpers built on it) does.
///
/// This outlives individual readline sessions. Loading it from, and saving it to, disk
/// is up to the caller: see [`Self::from_entries()`] and [`Self::entries()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<String>,
    nav_index: usize,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self { Self::with_max_entries(HISTORY_SIZE_MAX) }
}

impl History {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Once full, appending drops the oldest entry. A bound of `0` is treated as `1`.
    #[must_use]
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            nav_index: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Seed a history from an externally loaded list (oldest first). The same rules as
    /// [`Self::append()`] apply to every line.
    #[must_use]
    pub fn from_entries<I, S>(max_entries: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut history = Self::with_max_entries(max_entries);
        for line in entries {
            history.append(line);
        }
        history
    }
}

impl History {
    /// Store a committed line. Empty lines, and a line equal to the most recent entry,
    /// are not stored. Either way, navigation goes back to the fresh line position.
    ///
    /// Returns `true` if the line was stored.
    pub fn append(&mut self, line: impl Into<String>) -> bool {
        let line = line.into();

        let is_stored = !line.is_empty() && self.entries.back() != Some(&line);
        if is_stored {
            self.entries.push_back(line);
            if self.entries.len() > self.max_entries {
                self.entries.pop_front();
            }
        }

        self.reset_navigation();
        is_stored
    }

    /// Step back to an older entry. Stays on the oldest entry once it is reached (no
    /// wraparound). Returns `""` if there is no history at all.
    pub fn previous(&mut self) -> &str {
        if self.entries.is_empty() {
            return "";
        }
        self.nav_index = self.nav_index.saturating_sub(1);
        &self.entries[self.nav_index]
    }

    /// Step forward to a newer entry. Stepping past the newest entry returns `""`, which
    /// means "back to the fresh line". Calling this while already on the fresh line is a
    /// no-op that returns `""`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> &str {
        if self.entries.is_empty() || self.nav_index == self.entries.len() {
            return "";
        }
        self.nav_index += 1;
        match self.entries.get(self.nav_index) {
            Some(entry) => entry,
            None => "",
        }
    }

    pub fn reset_navigation(&mut self) { self.nav_index = self.entries.len(); }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.reset_navigation();
    }
}

impl History {
    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn nav_index(&self) -> usize { self.nav_index }

    #[must_use]
    pub fn is_browsing(&self) -> bool { self.nav_index < self.entries.len() }

    #[must_use]
    pub fn max_entries(&self) -> usize { self.max_entries }

    /// Oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.entries.iter().map(String::as_str)
    }
}
