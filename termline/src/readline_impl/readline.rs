// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEFAULT_PROMPT, EditorState, HISTORY_SIZE_MAX, History, InputDevice,
            InterruptBehavior, LineEditor, OutputDevice, PosixTerminalDriver,
            RawModeAcquisition, RawModeGuard, ReaderEvent, ReaderExit,
            SafeRawModeDriver, acquire_raw_mode, lock_output_device_as_mut,
            spawn_key_event_reader};
use miette::Report;
use std::{io, sync::Arc};
use thiserror::Error;
use tokio::sync::mpsc::unbounded_channel;

/// Error returned from [`Readline::readline()`]. Raw mode has always been released by the
/// time one of these reaches the caller.
#[derive(Debug, Error)]
pub enum ReadlineError {
    /// Reading the input device, or writing to the output device, failed.
    ///
    /// If the write side failed, the session's reader may still be blocked on input.
    /// It consumes one more keystroke before it notices the session is gone, so drop
    /// the [`Readline`] after this error rather than calling [`Readline::readline()`]
    /// again.
    #[error(transparent)]
    IO(#[from] io::Error),

    /// The input reached end of file before a line was committed.
    #[error("end of input")]
    Eof,

    /// Ctrl+C was pressed, with [`InterruptBehavior::ReturnError`] in effect.
    #[error("interrupted")]
    Interrupted,

    /// The terminal could not be switched to, or back from, raw mode.
    #[error("raw mode: {0}")]
    RawMode(String),
}

/// For convenience, convert [`Report`] to [`ReadlineError`], so that `?` works on the
/// raw mode functions.
impl From<Report> for ReadlineError {
    fn from(report: Report) -> Self { ReadlineError::RawMode(format!("{report}")) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadlineConfig {
    /// Printed at the start of every session, and again on every full line redraw. May
    /// contain ANSI styling.
    pub prompt: String,
    pub history_max_entries: usize,
    pub interrupt_behavior: InterruptBehavior,
}

impl Default for ReadlineConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.into(),
            history_max_entries: HISTORY_SIZE_MAX,
            interrupt_behavior: InterruptBehavior::default(),
        }
    }
}

/// Reads one line at a time from the terminal, with cursor editing and history.
///
/// The [`History`] lives here and survives across calls to [`Self::readline()`]. Only
/// one session can be in flight at a time (it takes `&mut self`).
///
/// # Example
///
/// ```no_run
/// use termline::{Readline, ReadlineConfig, ReadlineError};
///
/// # async fn run() -> miette::Result<()> {
/// let mut readline = Readline::new(ReadlineConfig::default());
/// loop {
///     match readline.readline().await {
///         Ok(line) => println!("got: {line}"),
///         Err(ReadlineError::Eof) => break,
///         Err(err) => return Err(miette::miette!("{err}")),
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[allow(missing_debug_implementations)]
pub struct Readline {
    pub config: ReadlineConfig,
    pub history: History,
    pub input_device: InputDevice,
    pub output_device: OutputDevice,
    pub raw_mode_driver: SafeRawModeDriver,
    /// The degraded mode warning is only issued once per instance.
    pub degraded_warning_issued: bool,
}

impl Readline {
    /// Uses the process' `stdin`, `stdout`, and controlling terminal.
    #[must_use]
    pub fn new(config: ReadlineConfig) -> Self {
        Self::new_with_devices(
            config,
            InputDevice::new_stdin(),
            OutputDevice::new_stdout(),
            Arc::new(PosixTerminalDriver),
        )
    }

    #[must_use]
    pub fn new_with_devices(
        config: ReadlineConfig,
        input_device: InputDevice,
        output_device: OutputDevice,
        raw_mode_driver: SafeRawModeDriver,
    ) -> Self {
        let history = History::with_max_entries(config.history_max_entries);
        Self {
            config,
            history,
            input_device,
            output_device,
            raw_mode_driver,
            degraded_warning_issued: false,
        }
    }

    /// Replace the history, eg: with one loaded from disk.
    #[must_use]
    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn history(&self) -> &History { &self.history }

    pub fn history_mut(&mut self) -> &mut History { &mut self.history }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.config.prompt = prompt.into();
    }
}

impl Readline {
    /// Run one session: show the prompt, let the user edit a line, and return it once
    /// Enter is pressed. A committed line is appended to the history (subject to the
    /// history's own rules) before it is returned.
    ///
    /// # Errors
    ///
    /// - [`ReadlineError::Eof`] if the input ends before Enter.
    /// - [`ReadlineError::Interrupted`] on Ctrl+C, if configured to return it.
    /// - [`ReadlineError::IO`] if reading or writing fails. The terminal is restored, but
    ///   this instance should not be reused (see [`ReadlineError::IO`]).
    /// - [`ReadlineError::RawMode`] if the terminal refuses raw mode.
    pub async fn readline(&mut self) -> Result<String, ReadlineError> {
        match acquire_raw_mode(self.raw_mode_driver.clone())? {
            RawModeAcquisition::Acquired(guard) => self.read_line_in_raw_mode(guard).await,
            RawModeAcquisition::NoTty => self.read_line_degraded().await,
        }
    }

    async fn read_line_in_raw_mode(
        &mut self,
        guard: RawModeGuard,
    ) -> Result<String, ReadlineError> {
        let (sender, mut receiver) = unbounded_channel();
        let reader_handle = spawn_key_event_reader(
            self.input_device.clone(),
            self.output_device.clone(),
            guard.release_handle(),
            self.config.interrupt_behavior,
            sender,
        );

        let mut line_editor = LineEditor::new(self.config.prompt.clone());
        line_editor.render_prompt(lock_output_device_as_mut!(self.output_device))?;

        while let Some(reader_event) = receiver.recv().await {
            let key_event = match reader_event {
                ReaderEvent::Key(key_event) => key_event,
                ReaderEvent::Failed(err) => {
                    guard.release()?;
                    return Err(ReadlineError::IO(err));
                }
            };

            let editor_state = line_editor.apply_event_and_render(
                key_event,
                &mut self.history,
                lock_output_device_as_mut!(self.output_device),
            )?;

            if let EditorState::Committed(line) = editor_state {
                guard.release()?;
                // The reader stops right after sending Enter.
                reader_handle.await.ok();
                self.history.append(line.as_str());
                return Ok(line);
            }
        }

        // The channel closed without a committed line.
        guard.release()?;
        let reader_exit = reader_handle
            .await
            .map_err(|join_error| ReadlineError::IO(io::Error::other(join_error)))?;

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "Readline::readline -> session ended without a line",
            reader_exit = %reader_exit.as_ref()
        );

        match reader_exit {
            // The reader has already moved the cursor to a fresh line.
            ReaderExit::Interrupted => Err(ReadlineError::Interrupted),
            ReaderExit::EndOfInput
            | ReaderExit::Committed
            | ReaderExit::Failed
            | ReaderExit::ReceiverDropped => Err(ReadlineError::Eof),
        }
    }

    /// No controlling tty: read bytes verbatim up to the next line feed. No echo, no
    /// cursor editing, no history navigation.
    async fn read_line_degraded(&mut self) -> Result<String, ReadlineError> {
        if !self.degraded_warning_issued {
            self.degraded_warning_issued = true;
            tracing::warn!(
                message = "Readline::readline -> no controlling terminal, line editing is disabled"
            );
            eprintln!("warning: no controlling terminal, line editing is disabled");
        }

        let input_device = self.input_device.clone();
        let maybe_line =
            tokio::task::spawn_blocking(move || read_line_unprocessed(&input_device))
                .await
                .map_err(|join_error| ReadlineError::IO(io::Error::other(join_error)))??;

        let Some(line) = maybe_line else {
            return Err(ReadlineError::Eof);
        };
        self.history.append(line.as_str());
        Ok(line)
    }
}

/// Read up to (not including) the next line feed. A trailing carriage return is dropped.
/// Returns `None` if the input is already at end of file. A final line without a line
/// feed is still returned.
///
/// # Errors
///
/// Returns the underlying I/O error if a read fails.
pub fn read_line_unprocessed(input_device: &InputDevice) -> io::Result<Option<String>> {
    let mut bytes = vec![];
    let mut is_anything_read = false;

    while let Some(byte) = input_device.read_byte()? {
        is_anything_read = true;
        if byte == b'\n' {
            break;
        }
        bytes.push(byte);
    }

    if !is_anything_read {
        return Ok(None);
    }
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}
