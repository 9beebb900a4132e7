// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Set up [`tracing`] for an app that uses this crate. While a line is being edited the
//! terminal is in raw mode, so log output should go to a file (see [`WriterConfig`])
//! rather than to `stdout`.

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
