// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::style::Stylize;

pub const DEFAULT_PROMPT_TEXT: &str = "> ";

#[must_use]
pub fn default_prompt() -> String { format!("{}", DEFAULT_PROMPT_TEXT.bold().cyan()) }

#[must_use]
pub fn welcome_msg() -> String {
    format!(
        "{} Type {} for a list of commands.",
        "tl-shell".bold().cyan(),
        "help".green()
    )
}

#[must_use]
pub fn help_msg() -> String {
    [
        format!("{}", "Commands:".bold()),
        format!("  {}          show this message", "help".green()),
        format!("  {}       list previous commands", "history".green()),
        format!("  {} forget all previous commands", "history clear".green()),
        format!("  {}     leave the shell", "exit, quit".green()),
        String::from("Keys: ← → move, ↑ ↓ browse history, Backspace, Enter, Ctrl+C."),
    ]
    .join("\n")
}

#[must_use]
pub fn history_empty_msg() -> String { format!("{}", "No history yet.".dark_grey()) }

#[must_use]
pub fn history_cleared_msg() -> String { format!("{}", "History cleared.".yellow()) }

#[must_use]
pub fn unknown_command_msg(line: &str) -> String {
    format!("{} {line}", "Unknown command:".red())
}

#[must_use]
pub fn goodbye_msg() -> String { format!("{}", "Goodbye 👋".cyan()) }
