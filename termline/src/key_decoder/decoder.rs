// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::KeyEvent;
use crate::ByteSource;
use std::io;

pub mod ascii {
    pub const ETX: u8 = 3;
    pub const LF: u8 = 10;
    pub const ESC: u8 = 27;
    pub const CSI_INTRODUCER: u8 = b'[';
    pub const DEL: u8 = 127;
    pub const PRINTABLE_FIRST: u8 = 32;
    pub const PRINTABLE_LAST: u8 = 126;
}

pub mod csi {
    pub const ARROW_UP: u8 = b'A';
    pub const ARROW_DOWN: u8 = b'B';
    pub const ARROW_RIGHT: u8 = b'C';
    pub const ARROW_LEFT: u8 = b'D';
    /// Parameter (`0-9;<=>?`) and intermediate (space to `/`) bytes.
    pub const PARAMETER_OR_INTERMEDIATE: std::ops::RangeInclusive<u8> = 0x20..=0x3F;
    /// Final bytes (`@` to `~`) end a CSI sequence.
    pub const FINAL: std::ops::RangeInclusive<u8> = 0x40..=0x7E;
    /// Upper bound on bytes swallowed while skipping an unsupported CSI sequence.
    pub const MAX_SKIPPED_BYTES: usize = 16;
}

/// Decode exactly one [`KeyEvent`], given its first byte. Further bytes of an escape
/// sequence are pulled from `source`, blocking until they arrive; terminals emit a whole
/// sequence at once, so there is nothing to gain from guessing.
///
/// `ESC` followed by anything but `[` is [`KeyEvent::Unrecognized`] (`27`), with the
/// second byte consumed. `ESC [ <final>` for anything but the four arrows is
/// [`KeyEvent::Unrecognized`] of that third byte. Longer CSI sequences (`ESC [ 3 ~` for
/// Delete, `ESC [ 1 ; 5 C` for `Ctrl+Right`) are consumed up to their final byte and
/// reported as [`KeyEvent::Unrecognized`] of their third byte.
///
/// End of input in the middle of a sequence ends the sequence; the reader will see the
/// end of input on its next read.
///
/// # Errors
///
/// Returns the I/O error if reading a continuation byte fails.
pub fn decode_key_event<S>(first_byte: u8, source: &mut S) -> io::Result<KeyEvent>
where
    S: ByteSource + ?Sized,
{
    Ok(match first_byte {
        ascii::LF => KeyEvent::Enter,
        ascii::DEL => KeyEvent::Backspace,
        ascii::ETX => KeyEvent::Interrupt,
        ascii::ESC => decode_escape_sequence(source)?,
        ascii::PRINTABLE_FIRST..=ascii::PRINTABLE_LAST => {
            KeyEvent::Printable(char::from(first_byte))
        }
        _ => KeyEvent::Unrecognized(first_byte),
    })
}

fn decode_escape_sequence<S>(source: &mut S) -> io::Result<KeyEvent>
where
    S: ByteSource + ?Sized,
{
    match source.read_byte()? {
        Some(ascii::CSI_INTRODUCER) => {}
        Some(_) | None => return Ok(KeyEvent::Unrecognized(ascii::ESC)),
    }

    let Some(third_byte) = source.read_byte()? else {
        return Ok(KeyEvent::Unrecognized(ascii::CSI_INTRODUCER));
    };

    Ok(match third_byte {
        csi::ARROW_UP => KeyEvent::ArrowUp,
        csi::ARROW_DOWN => KeyEvent::ArrowDown,
        csi::ARROW_RIGHT => KeyEvent::ArrowRight,
        csi::ARROW_LEFT => KeyEvent::ArrowLeft,
        it if csi::PARAMETER_OR_INTERMEDIATE.contains(&it) => {
            skip_to_csi_final_byte(source)?;
            KeyEvent::Unrecognized(it)
        }
        it => KeyEvent::Unrecognized(it),
    })
}

fn skip_to_csi_final_byte<S>(source: &mut S) -> io::Result<()>
where
    S: ByteSource + ?Sized,
{
    for _ in 0..csi::MAX_SKIPPED_BYTES {
        match source.read_byte()? {
            Some(byte) if csi::FINAL.contains(&byte) => break,
            Some(_) => {}
            None => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ReadByteSource, ScriptedReader};
    use pretty_assertions::assert_eq;
    use std::io::ErrorKind;
    use test_case::test_case;

    /// Decode every event in `bytes`, the same way the reader task does.
    fn decode_all(bytes: &[u8]) -> Vec<KeyEvent> {
        let mut source = ReadByteSource::new(bytes);
        let mut acc = vec![];
        while let Some(first_byte) = source.read_byte().unwrap() {
            acc.push(decode_key_event(first_byte, &mut source).unwrap());
        }
        acc
    }

    #[test_case(b"\n", KeyEvent::Enter; "line feed is enter")]
    #[test_case(&[127], KeyEvent::Backspace; "del is backspace")]
    #[test_case(&[3], KeyEvent::Interrupt; "etx is interrupt")]
    #[test_case(b"\x1b[A", KeyEvent::ArrowUp; "csi a is up")]
    #[test_case(b"\x1b[B", KeyEvent::ArrowDown; "csi b is down")]
    #[test_case(b"\x1b[C", KeyEvent::ArrowRight; "csi c is right")]
    #[test_case(b"\x1b[D", KeyEvent::ArrowLeft; "csi d is left")]
    #[test_case(b" ", KeyEvent::Printable(' '); "space is printable")]
    #[test_case(b"~", KeyEvent::Printable('~'); "tilde is printable")]
    #[test_case(b"\r", KeyEvent::Unrecognized(13); "carriage return is unrecognized")]
    #[test_case(&[8], KeyEvent::Unrecognized(8); "ctrl h is unrecognized")]
    #[test_case(&[0], KeyEvent::Unrecognized(0); "nul is unrecognized")]
    #[test_case(&[0xC3], KeyEvent::Unrecognized(0xC3); "high bit byte is unrecognized")]
    #[test_case(b"\x1b[H", KeyEvent::Unrecognized(b'H'); "home is unrecognized")]
    #[test_case(b"\x1bx", KeyEvent::Unrecognized(27); "alt chord is unrecognized")]
    #[test_case(b"\x1b", KeyEvent::Unrecognized(27); "lone escape at end of input")]
    #[test_case(b"\x1b[", KeyEvent::Unrecognized(b'['); "truncated csi")]
    fn test_decode_single_event(bytes: &[u8], expected: KeyEvent) {
        assert_eq!(decode_all(bytes), vec![expected]);
    }

    #[test]
    fn test_printable_range_is_exact() {
        for byte in 0_u8..=255 {
            let events = decode_all(&[byte]);
            assert_eq!(events.len(), 1, "byte {byte}");
            let is_printable = matches!(events[0], KeyEvent::Printable(_));
            assert_eq!(is_printable, (32..=126).contains(&byte), "byte {byte}");
        }
    }

    #[test]
    fn test_alt_chord_consumes_second_byte() {
        assert_eq!(
            decode_all(b"\x1bxy"),
            vec![KeyEvent::Unrecognized(27), KeyEvent::Printable('y')]
        );
    }

    #[test]
    fn test_parameterized_csi_is_skipped_whole() {
        // Delete key, then Ctrl+Right, then a plain character.
        assert_eq!(
            decode_all(b"\x1b[3~\x1b[1;5Cz"),
            vec![
                KeyEvent::Unrecognized(b'3'),
                KeyEvent::Unrecognized(b'1'),
                KeyEvent::Printable('z'),
            ]
        );
    }

    #[test]
    fn test_mixed_stream_keeps_order() {
        assert_eq!(
            decode_all(b"ab\x1b[D\x1b[Cc\x7f\n"),
            vec![
                KeyEvent::Printable('a'),
                KeyEvent::Printable('b'),
                KeyEvent::ArrowLeft,
                KeyEvent::ArrowRight,
                KeyEvent::Printable('c'),
                KeyEvent::Backspace,
                KeyEvent::Enter,
            ]
        );
    }

    #[test]
    fn test_error_mid_sequence_is_surfaced() {
        let reader = ScriptedReader::new(b"\x1b[A").with_error_at(1, ErrorKind::Other);
        let mut source = ReadByteSource::new(reader);
        let first_byte = source.read_byte().unwrap().unwrap();
        let result = decode_key_event(first_byte, &mut source);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Other);
    }

    #[test]
    fn test_key_event_name_for_logging() {
        assert_eq!(KeyEvent::ArrowUp.as_ref(), "ArrowUp");
        assert_eq!(KeyEvent::Printable('x').as_ref(), "Printable");
    }
}
