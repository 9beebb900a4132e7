// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;
use tracing_core::LevelFilter;

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "tl-shell")]
#[command(about = "A tiny shell with line editing and command history")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(false))]
pub struct CLIArg {
    #[arg(long, help = "Text shown before the cursor (default: a bold cyan `> `)")]
    pub prompt: Option<String>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Where command history is loaded from and saved to (default: <config dir>/termline/history)"
    )]
    pub history_file: Option<PathBuf>,

    #[arg(
        long,
        conflicts_with = "history_file",
        help = "Keep history in memory only, for this run"
    )]
    pub no_history_file: bool,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file named `log.txt` for debugging"
    )]
    pub enable_logging: bool,

    #[arg(global = true, long, value_enum, default_value_t = LogLevel::Debug)]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Which history file to use, if any, after applying the command line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryFileChoice {
    Path(PathBuf),
    InMemoryOnly,
}

impl CLIArg {
    /// `--no-history-file` wins. Without `--history-file`, fall back to the default path,
    /// or to in memory only if the platform has no config folder.
    #[must_use]
    pub fn history_file_choice(&self) -> HistoryFileChoice {
        if self.no_history_file {
            return HistoryFileChoice::InMemoryOnly;
        }
        match self
            .history_file
            .clone()
            .or_else(crate::try_get_default_history_file_path)
        {
            Some(path) => HistoryFileChoice::Path(path),
            None => HistoryFileChoice::InMemoryOnly,
        }
    }
}
