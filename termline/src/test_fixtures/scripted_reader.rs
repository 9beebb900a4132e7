// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, ErrorKind, Read};

/// A [`Read`] implementation that replays a fixed script of bytes, one byte per read
/// call (like a tty in raw mode with `VMIN=1`). It can be told to fail once at a given
/// byte offset, to exercise the error paths of the reader task.
#[derive(Debug, Clone, Default)]
pub struct ScriptedReader {
    pub bytes: Vec<u8>,
    pub position: usize,
    pub fail_at: Option<(usize, ErrorKind)>,
}

impl ScriptedReader {
    #[must_use]
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: bytes.as_ref().to_vec(),
            ..Default::default()
        }
    }

    /// The read that would return the byte at `offset` fails with `kind` instead. The
    /// failure fires once; the byte is still delivered by the read after it.
    #[must_use]
    pub fn with_error_at(mut self, offset: usize, kind: ErrorKind) -> Self {
        self.fail_at = Some((offset, kind));
        self
    }
}

impl Read for ScriptedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some((offset, kind)) = self.fail_at
            && offset == self.position
        {
            self.fail_at = None;
            return Err(io::Error::new(kind, "scripted read failure"));
        }

        match (self.bytes.get(self.position), buf.first_mut()) {
            (Some(byte), Some(slot)) => {
                *slot = *byte;
                self.position += 1;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
