// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::ui_str;
use std::{io::{self, Write},
          ops::ControlFlow};
use termline::History;

/// A line typed at the shell prompt, after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Blank input.
    Nothing,
    Help,
    History,
    HistoryClear,
    Exit,
    Unknown(String),
}

impl From<&str> for ShellCommand {
    fn from(line: &str) -> Self {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => ShellCommand::Nothing,
            ["help"] => ShellCommand::Help,
            ["history"] => ShellCommand::History,
            ["history", "clear"] => ShellCommand::HistoryClear,
            ["exit" | "quit"] => ShellCommand::Exit,
            _ => ShellCommand::Unknown(line.trim().to_string()),
        }
    }
}

impl ShellCommand {
    /// Run the command, printing its output to `term`. Returns [`ControlFlow::Break`]
    /// when the shell should stop.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `term` fails.
    pub fn execute(
        &self,
        history: &mut History,
        term: &mut dyn Write,
    ) -> io::Result<ControlFlow<()>> {
        match self {
            ShellCommand::Nothing => {}
            ShellCommand::Help => writeln!(term, "{}", ui_str::help_msg())?,
            ShellCommand::History => {
                if history.is_empty() {
                    writeln!(term, "{}", ui_str::history_empty_msg())?;
                }
                for (index, entry) in history.entries().enumerate() {
                    writeln!(term, "{:>4}  {entry}", index + 1)?;
                }
            }
            ShellCommand::HistoryClear => {
                history.clear();
                writeln!(term, "{}", ui_str::history_cleared_msg())?;
            }
            ShellCommand::Exit => {
                writeln!(term, "{}", ui_str::goodbye_msg())?;
                term.flush()?;
                return Ok(ControlFlow::Break(()));
            }
            ShellCommand::Unknown(line) => {
                writeln!(term, "{}", ui_str::unknown_command_msg(line))?;
            }
        }
        term.flush()?;
        Ok(ControlFlow::Continue(()))
    }
}
