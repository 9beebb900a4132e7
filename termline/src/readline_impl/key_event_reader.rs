// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEBUG_READLINE_MOD, INTERRUPT_EXIT_CODE, InputDevice, KeyEvent,
            OutputDevice, RawModeReleaseHandle, decode_key_event,
            lock_output_device_as_mut};
use std::{io::{self, Write},
          sync::PoisonError};
use strum_macros::AsRefStr;
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};

/// What the reader publishes to the session, in keystroke order.
#[derive(Debug)]
pub enum ReaderEvent {
    Key(KeyEvent),
    /// Reading from the input device failed. Raw mode has already been released when
    /// this arrives.
    Failed(io::Error),
}

/// Why the reader stopped. The session consults this when the channel closes without a
/// committed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum ReaderExit {
    /// Enter was decoded and sent.
    Committed,
    /// The input device reached end of input.
    EndOfInput,
    Failed,
    /// Ctrl+C was decoded and [`InterruptBehavior::ReturnError`] is in effect.
    Interrupted,
    /// Nobody is listening anymore.
    ReceiverDropped,
}

/// What Ctrl+C does. In both cases the terminal is restored first, by the reader, right
/// when the keystroke is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptBehavior {
    /// Terminate the whole process, like the default `SIGINT` disposition would in
    /// canonical mode.
    ExitProcess { exit_code: i32 },
    /// End the session with [`crate::ReadlineError::Interrupted`] and let the caller
    /// decide.
    ReturnError,
}

impl Default for InterruptBehavior {
    fn default() -> Self {
        Self::ExitProcess {
            exit_code: INTERRUPT_EXIT_CODE,
        }
    }
}

/// Start the reader for one readline session on tokio's blocking pool.
///
/// The reader blocks on `input_device`, decodes each keystroke with
/// [`decode_key_event()`], and sends it on `sender`. It stops after sending
/// [`KeyEvent::Enter`], so at most one reader is alive per session, and bytes typed
/// after Enter stay in the input device for the next session.
///
/// On Ctrl+C the reader restores the terminal and moves `output_device` to a fresh line
/// before it exits the process or returns, depending on `interrupt_behavior`.
pub fn spawn_key_event_reader(
    input_device: InputDevice,
    output_device: OutputDevice,
    release_handle: RawModeReleaseHandle,
    interrupt_behavior: InterruptBehavior,
    sender: UnboundedSender<ReaderEvent>,
) -> JoinHandle<ReaderExit> {
    tokio::task::spawn_blocking(move || {
        run_key_event_reader(
            &input_device,
            &output_device,
            &release_handle,
            interrupt_behavior,
            &sender,
        )
    })
}

/// The body of the reader task. This blocks the calling thread. See
/// [`spawn_key_event_reader()`].
pub fn run_key_event_reader(
    input_device: &InputDevice,
    output_device: &OutputDevice,
    release_handle: &RawModeReleaseHandle,
    interrupt_behavior: InterruptBehavior,
    sender: &UnboundedSender<ReaderEvent>,
) -> ReaderExit {
    loop {
        let result = {
            let mut source = input_device
                .resource
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            match source.read_byte() {
                Ok(Some(first_byte)) => decode_key_event(first_byte, &mut *source).map(Some),
                Ok(None) => Ok(None),
                Err(err) => Err(err),
            }
        };

        let key_event = match result {
            Ok(Some(key_event)) => key_event,
            Ok(None) => {
                DEBUG_READLINE_MOD.then(|| {
                    tracing::debug!(message = "key_event_reader -> end of input");
                });
                return ReaderExit::EndOfInput;
            }
            Err(err) => {
                // % is Display, ? is Debug.
                tracing::error!(message = "key_event_reader -> read failed", error = %err);
                release_or_log(release_handle);
                sender.send(ReaderEvent::Failed(err)).ok();
                return ReaderExit::Failed;
            }
        };

        DEBUG_READLINE_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::trace!(message = "key_event_reader -> decoded", key_event = ?key_event);
        });

        match key_event {
            KeyEvent::Interrupt => {
                release_or_log(release_handle);
                // Leave the cursor on a fresh line, like the shell does after ^C.
                if let Err(err) = write_new_line(output_device) {
                    // % is Display, ? is Debug.
                    tracing::error!(
                        message = "key_event_reader -> could not end the line",
                        error = %err
                    );
                }
                match interrupt_behavior {
                    InterruptBehavior::ExitProcess { exit_code } => {
                        tracing::info!(
                            message = "key_event_reader -> interrupt, exiting process",
                            exit_code = %exit_code
                        );
                        std::process::exit(exit_code);
                    }
                    InterruptBehavior::ReturnError => return ReaderExit::Interrupted,
                }
            }
            KeyEvent::Enter => {
                return match sender.send(ReaderEvent::Key(key_event)) {
                    Ok(()) => ReaderExit::Committed,
                    Err(_) => ReaderExit::ReceiverDropped,
                };
            }
            _ => {
                if sender.send(ReaderEvent::Key(key_event)).is_err() {
                    return ReaderExit::ReceiverDropped;
                }
            }
        }
    }
}

fn write_new_line(output_device: &OutputDevice) -> io::Result<()> {
    let term = lock_output_device_as_mut!(output_device);
    term.write_all(b"\r\n")?;
    term.flush()
}

fn release_or_log(release_handle: &RawModeReleaseHandle) {
    if let Err(report) = release_handle.release() {
        // % is Display, ? is Debug.
        tracing::error!(
            message = "key_event_reader -> could not restore terminal",
            error = %report
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MockRawModeDriver, OutputDeviceExt, RawModeAcquisition, RawModeGuard,
                ScriptedReader, acquire_raw_mode};
    use pretty_assertions::assert_eq;
    use std::{io::ErrorKind, sync::Arc};
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    fn acquire(driver: &MockRawModeDriver) -> RawModeGuard {
        match acquire_raw_mode(Arc::new(driver.clone())).unwrap() {
            RawModeAcquisition::Acquired(guard) => guard,
            RawModeAcquisition::NoTty => panic!("mock driver is a tty"),
        }
    }

    fn drain_keys(receiver: &mut UnboundedReceiver<ReaderEvent>) -> Vec<KeyEvent> {
        let mut keys = vec![];
        while let Ok(event) = receiver.try_recv() {
            match event {
                ReaderEvent::Key(key_event) => keys.push(key_event),
                ReaderEvent::Failed(err) => panic!("unexpected failure: {err}"),
            }
        }
        keys
    }

    #[tokio::test]
    async fn test_reader_publishes_in_order_and_stops_after_enter() {
        let driver = MockRawModeDriver::new();
        let guard = acquire(&driver);
        let input_device = InputDevice::new_from_reader(ScriptedReader::new(b"ab\x1b[D\nleft over"));
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let (sender, mut receiver) = unbounded_channel();

        let exit = spawn_key_event_reader(
            input_device.clone(),
            output_device,
            guard.release_handle(),
            InterruptBehavior::ReturnError,
            sender,
        )
        .await
        .unwrap();

        assert_eq!(exit, ReaderExit::Committed);
        assert_eq!(
            drain_keys(&mut receiver),
            vec![
                KeyEvent::Printable('a'),
                KeyEvent::Printable('b'),
                KeyEvent::ArrowLeft,
                KeyEvent::Enter,
            ]
        );
        // Bytes after Enter were not consumed.
        assert_eq!(input_device.read_byte().unwrap(), Some(b'l'));
        // Committing is not the reader's call; the terminal is still raw.
        assert!(driver.is_raw());
        assert_eq!(stdout_mock.get_write_count(), 0);
    }

    #[tokio::test]
    async fn test_reader_end_of_input() {
        let driver = MockRawModeDriver::new();
        let guard = acquire(&driver);
        let input_device = InputDevice::new_from_reader(ScriptedReader::new(b"x"));
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let (sender, mut receiver) = unbounded_channel();

        let exit = spawn_key_event_reader(
            input_device,
            output_device,
            guard.release_handle(),
            InterruptBehavior::ReturnError,
            sender,
        )
        .await
        .unwrap();

        assert_eq!(exit, ReaderExit::EndOfInput);
        assert_eq!(drain_keys(&mut receiver), vec![KeyEvent::Printable('x')]);
        assert_eq!(stdout_mock.get_write_count(), 0);
    }

    #[tokio::test]
    async fn test_reader_interrupt_restores_terminal_immediately() {
        let driver = MockRawModeDriver::new();
        let guard = acquire(&driver);
        let input_device = InputDevice::new_from_reader(ScriptedReader::new(b"a\x03b"));
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let (sender, mut receiver) = unbounded_channel();

        let exit = spawn_key_event_reader(
            input_device,
            output_device,
            guard.release_handle(),
            InterruptBehavior::ReturnError,
            sender,
        )
        .await
        .unwrap();

        assert_eq!(exit, ReaderExit::Interrupted);
        assert_eq!(exit.as_ref(), "Interrupted");
        assert_eq!(drain_keys(&mut receiver), vec![KeyEvent::Printable('a')]);
        assert!(!driver.is_raw());
        assert!(guard.is_released());
        // The cursor is moved to a fresh line, same as before a process exit.
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "\r\n");

        // Dropping the guard later does not restore a second time.
        drop(guard);
        assert_eq!(driver.disable_count(), 1);
    }

    #[tokio::test]
    async fn test_reader_failure_restores_terminal_and_reports() {
        let driver = MockRawModeDriver::new();
        let guard = acquire(&driver);
        let input_device = InputDevice::new_from_reader(
            ScriptedReader::new(b"ab").with_error_at(1, ErrorKind::BrokenPipe),
        );
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let (sender, mut receiver) = unbounded_channel();

        let exit = spawn_key_event_reader(
            input_device,
            output_device,
            guard.release_handle(),
            InterruptBehavior::ReturnError,
            sender,
        )
        .await
        .unwrap();

        assert_eq!(exit, ReaderExit::Failed);
        assert!(matches!(
            receiver.try_recv(),
            Ok(ReaderEvent::Key(KeyEvent::Printable('a')))
        ));
        match receiver.try_recv() {
            Ok(ReaderEvent::Failed(err)) => assert_eq!(err.kind(), ErrorKind::BrokenPipe),
            other => panic!("expected a failure, got {other:?}"),
        }
        assert!(!driver.is_raw());
        assert_eq!(driver.disable_count(), 1);
        assert_eq!(stdout_mock.get_write_count(), 0);
    }

    #[tokio::test]
    async fn test_reader_stops_when_receiver_dropped() {
        let driver = MockRawModeDriver::new();
        let guard = acquire(&driver);
        let input_device = InputDevice::new_from_reader(ScriptedReader::new(b"abc\n"));
        let (output_device, _stdout_mock) = OutputDevice::new_mock();
        let (sender, receiver) = unbounded_channel();
        drop(receiver);

        let exit = spawn_key_event_reader(
            input_device.clone(),
            output_device,
            guard.release_handle(),
            InterruptBehavior::ReturnError,
            sender,
        )
        .await
        .unwrap();

        assert_eq!(exit, ReaderExit::ReceiverDropped);
        assert_eq!(input_device.read_byte().unwrap(), Some(b'b'));
    }

    #[test]
    fn test_default_interrupt_behavior_exits_with_sigint_code() {
        assert_eq!(
            InterruptBehavior::default(),
            InterruptBehavior::ExitProcess { exit_code: 130 }
        );
    }
}
