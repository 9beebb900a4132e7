// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEBUG_SHELL_MOD, HISTORY_FILE_SAVE_MAX};
use dirs::config_dir;
use miette::{Context, IntoDiagnostic};
use std::{fmt::{Display, Formatter, Result},
          fs,
          io::ErrorKind,
          path::{Path, PathBuf}};
use termline::History;

#[derive(Debug, Clone, Copy)]
pub enum ConfigPaths {
    TopLevelFolderName,
    HistoryFile,
}

impl Display for ConfigPaths {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let path = match self {
            ConfigPaths::TopLevelFolderName => "termline",
            ConfigPaths::HistoryFile => "history",
        };
        write!(f, "{path}")
    }
}

/// `<config dir>/termline/history`, eg: `~/.config/termline/history` on Linux. `None`
/// if the platform has no config folder.
#[must_use]
pub fn try_get_default_history_file_path() -> Option<PathBuf> {
    let home_config_folder_path = config_dir()?;
    Some(
        home_config_folder_path
            .join(ConfigPaths::TopLevelFolderName.to_string())
            .join(ConfigPaths::HistoryFile.to_string()),
    )
}

/// Load a history, one entry per line, oldest first. Blank lines are skipped. A missing
/// file is an empty history, not an error.
///
/// # Errors
///
/// Returns an error if the file exists but can't be read.
pub fn load_history(path: &Path, max_entries: usize) -> miette::Result<History> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            DEBUG_SHELL_MOD.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(message = "No history file yet.", path = ?path);
            });
            return Ok(History::with_max_entries(max_entries));
        }
        Err(error) => {
            return Err(error)
                .into_diagnostic()
                .wrap_err(format!("Could not read history file {}", path.display()));
        }
    };

    let history = History::from_entries(
        max_entries,
        content.lines().filter(|line| !line.trim().is_empty()),
    );

    DEBUG_SHELL_MOD.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(
            message = "Loaded history file.",
            path = ?path,
            entries = %history.len()
        );
    });

    Ok(history)
}

/// Write the most recent [`HISTORY_FILE_SAVE_MAX`] entries, oldest first, replacing the
/// file. Missing parent folders are created.
///
/// # Errors
///
/// Returns an error if the folder or the file can't be written.
pub fn save_history(path: &Path, history: &History) -> miette::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .into_diagnostic()
            .wrap_err(format!("Could not create folder {}", parent.display()))?;
    }

    let skip = history.len().saturating_sub(HISTORY_FILE_SAVE_MAX);
    let mut content = String::new();
    for entry in history.entries().skip(skip) {
        content.push_str(entry);
        content.push('\n');
    }

    fs::write(path, content)
        .into_diagnostic()
        .wrap_err(format!("Could not write history file {}", path.display()))?;

    DEBUG_SHELL_MOD.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(message = "Saved history file.", path = ?path);
    });

    Ok(())
}
