// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{SafeByteSource, StdMutex};
use std::{io::{self, ErrorKind, Read},
          sync::{Arc, PoisonError}};

/// A blocking source of raw input bytes, one at a time.
///
/// `Ok(None)` means end of input (the tty closed, or the pipe ran dry). The raw mode
/// driver configures the tty so that a read returns as soon as a single byte is
/// available, so a keystroke is never held back waiting for more.
pub trait ByteSource: Send {
    /// # Errors
    ///
    /// Returns the underlying I/O error if the read fails.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Adapts anything that is [`Read`] into a [`ByteSource`].
#[derive(Debug)]
pub struct ReadByteSource<R> {
    pub reader: R,
}

impl<R: Read> ReadByteSource<R> {
    pub fn new(reader: R) -> Self { Self { reader } }
}

impl<R: Read + Send> ByteSource for ReadByteSource<R> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0_u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                // A signal landed mid read, nothing was consumed.
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}

/// Reads from the process' [`std::io::stdin()`]. Bytes that the std buffer already
/// pulled off the tty stay there for the next session.
pub type StdinByteSource = ReadByteSource<io::Stdin>;

/// This struct represents an input device that raw bytes are read from.
/// - It is safe to clone; clones share the same underlying source.
/// - See [`crate::ScriptedReader`] for testing.
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct InputDevice {
    pub resource: SafeByteSource,
}

impl Default for InputDevice {
    fn default() -> Self { Self::new_stdin() }
}

impl InputDevice {
    #[must_use]
    pub fn new_stdin() -> Self { Self::new_from_reader(io::stdin()) }

    #[must_use]
    pub fn new_from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            resource: Arc::new(StdMutex::new(ReadByteSource::new(reader))),
        }
    }

    /// Blocks until the next byte arrives, or the source reaches end of input.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the read fails.
    pub fn read_byte(&self) -> io::Result<Option<u8>> {
        self.resource
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .read_byte()
    }
}
