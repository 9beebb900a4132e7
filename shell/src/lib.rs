// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `tl-shell` is a minimal REPL on top of [`termline`]. It supplies the prompt, loads
//! and saves the command history, and dispatches a handful of built-in commands. Every
//! line is read with [`termline::Readline::readline()`].

// Enforce strict error handling in production code only.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod clap_config;
pub mod commands;
pub mod history_file;
pub mod repl;
pub mod ui_str;

// Re-export.
pub use clap_config::*;
pub use commands::*;
pub use history_file::*;
pub use repl::*;

// Constants.
/// Only this many of the most recent entries are written back to the history file.
pub const HISTORY_FILE_SAVE_MAX: usize = 100;
pub const LOG_FILE_NAME: &str = "log.txt";

/// Flip this to `true` to trace history file I/O.
pub const DEBUG_SHELL_MOD: bool = false;
