// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// Create a file appender that never rolls over. The parent folder must already exist.
///
/// Note that if you wrap this up in a non blocking writer, events logged just before the
/// process exits (eg: on Ctrl+C) are lost.
///
/// # Errors
///
/// Returns an error if:
/// - The path has no parent directory
/// - The path has no file name
pub fn try_create(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let parent = match path.parent() {
        Some(it) if it.as_os_str().is_empty() => std::path::Path::new("."),
        Some(it) => it,
        None => {
            return Err(miette::miette!(
                "Can't access the folder for log file {}.",
                path.display()
            ));
        }
    };

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!("Can't access the file name of log file {}.", path.display())
    })?;

    Ok(tracing_appender::rolling::never(parent, file_name))
}
