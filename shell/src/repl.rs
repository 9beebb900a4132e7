// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::ShellCommand;
use std::{io::Write, ops::ControlFlow};
use termline::{Readline, ReadlineError};

/// How the read eval print loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    /// `exit` or `quit`.
    Command,
    EndOfInput,
    /// Ctrl+C. The terminal has already been restored.
    Interrupted,
}

/// Read lines and run them until the user leaves. Command output goes to `term`.
///
/// # Errors
///
/// Returns the first [`ReadlineError`] other than end of input or interrupt, or an I/O
/// error while writing command output.
pub async fn run_repl(
    readline: &mut Readline,
    term: &mut dyn Write,
) -> Result<ShellExit, ReadlineError> {
    loop {
        let line = match readline.readline().await {
            Ok(line) => line,
            Err(ReadlineError::Eof) => return Ok(ShellExit::EndOfInput),
            Err(ReadlineError::Interrupted) => return Ok(ShellExit::Interrupted),
            Err(error) => return Err(error),
        };

        let shell_command = ShellCommand::from(line.as_str());

        // % is Display, ? is Debug.
        tracing::debug!(message = "run_repl -> line", line = %line, command = ?shell_command);

        if shell_command.execute(readline.history_mut(), term)? == ControlFlow::Break(()) {
            return Ok(ShellExit::Command);
        }
    }
}
