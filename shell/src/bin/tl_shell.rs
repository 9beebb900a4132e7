// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::Parser;
use std::io::stdout;
use termline::{HISTORY_SIZE_MAX, History, INTERRUPT_EXIT_CODE, InterruptBehavior,
               Readline, ReadlineConfig, TracingConfig, WriterConfig};
use termline_shell::{CLIArg, HistoryFileChoice, LOG_FILE_NAME, ShellExit, load_history,
                     run_repl, save_history, ui_str};

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    // Log to a file. Anything written to stdout while raw mode is active garbles the
    // line being edited.
    if cli_arg.global_options.enable_logging {
        TracingConfig {
            writer_config: WriterConfig::File(LOG_FILE_NAME.into()),
            level_filter: cli_arg.global_options.log_level.into(),
        }
        .install_global()?;
    }

    let history_file_choice = cli_arg.history_file_choice();
    let history = match &history_file_choice {
        HistoryFileChoice::Path(path) => load_history(path, HISTORY_SIZE_MAX)?,
        HistoryFileChoice::InMemoryOnly => History::new(),
    };

    // % is Display, ? is Debug.
    tracing::debug!(
        message = "tl-shell -> start",
        history_file = ?history_file_choice,
        history_entries = %history.len()
    );

    let config = ReadlineConfig {
        prompt: cli_arg.prompt.clone().unwrap_or_else(ui_str::default_prompt),
        history_max_entries: HISTORY_SIZE_MAX,
        interrupt_behavior: InterruptBehavior::ReturnError,
    };
    let mut readline = Readline::new(config).with_history(history);

    println!("{}", ui_str::welcome_msg());
    let result = run_repl(&mut readline, &mut stdout()).await;

    // Save even if the loop failed, so the lines typed so far are kept.
    if let HistoryFileChoice::Path(path) = &history_file_choice {
        save_history(path, readline.history())?;
    }

    let shell_exit = result.map_err(|error| miette::miette!("{error}"))?;

    // % is Display, ? is Debug.
    tracing::debug!(message = "tl-shell -> exit", shell_exit = ?shell_exit);

    if shell_exit == ShellExit::Interrupted {
        std::process::exit(INTERRUPT_EXIT_CODE);
    }
    Ok(())
}
