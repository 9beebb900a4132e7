// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::try_create_layers;
use miette::IntoDiagnostic;
use tracing::subscriber::DefaultGuard;
use tracing_core::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Where log output goes, and how much of it.
///
/// # Example
///
/// ```no_run
/// use termline::{TracingConfig, WriterConfig};
/// use tracing_core::LevelFilter;
///
/// TracingConfig {
///     writer_config: WriterConfig::File("log.txt".into()),
///     level_filter: LevelFilter::DEBUG,
/// }
/// .install_global()
/// .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    /// Path of the log file.
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

impl TracingConfig {
    /// Log to the given file at `DEBUG` level.
    #[must_use]
    pub fn new_file(path: impl Into<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(path.into()),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    /// Install as the global default subscriber. This can only succeed once per process.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be created, or a global subscriber is
    /// already installed.
    pub fn install_global(self) -> miette::Result<()> {
        let layers = try_create_layers(self)?;
        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .into_diagnostic()
    }

    /// Install for the current thread only, until the returned guard is dropped. Handy
    /// in tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be created.
    pub fn install_thread_local(self) -> miette::Result<DefaultGuard> {
        let layers = try_create_layers(self)?;
        let subscriber = tracing_subscriber::registry().with(layers);
        Ok(tracing::subscriber::set_default(subscriber))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_thread_local_install_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("log.txt");
        let file_path_str = file_path.to_str().unwrap().to_string();

        let default_guard = TracingConfig {
            writer_config: WriterConfig::File(file_path_str),
            level_filter: LevelFilter::INFO,
        }
        .install_thread_local()
        .unwrap();

        tracing::error!(message = "error from test");
        tracing::info!(message = "info from test");
        tracing::debug!(message = "debug from test");
        drop(default_guard);

        let contents = std::fs::read_to_string(&file_path).unwrap();
        assert!(contents.contains("error from test"));
        assert!(contents.contains("info from test"));
        assert!(!contents.contains("debug from test"));
    }

    #[test]
    fn test_new_file() {
        let config = TracingConfig::new_file("log.txt");
        assert_eq!(config.get_level_filter(), LevelFilter::DEBUG);
        assert_eq!(config.get_writer_config(), WriterConfig::File("log.txt".into()));
    }
}
