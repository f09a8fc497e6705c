//! The SWCF wire format: length-prefixed frames with a zero end marker.
//!
//! ```text
//! Frame*  := (size: u32 LE, size > 0) (payload: size bytes)
//! EndMark := size: u32 LE == 0
//! Stream  := Frame* EndMark
//! ```
//!
//! No container header, no version field, no checksum. A reader consumes
//! `u32` prefixes sequentially and stops at the first zero; end-of-file
//! before a zero prefix is a truncated stream.

use std::io::{self, Read, Write};

use crate::error::{Error, Result};

/// Width of the frame size prefix (and of the end-of-data marker).
pub const FRAME_PREFIX_SIZE: usize = 4;

/// Appends frames to a byte sink.
///
/// Writes are sequential and append-only; nothing is ever seeked or
/// rewritten. [`FrameWriter::finish`] writes the single zero-size marker and
/// flushes the sink. All I/O failures surface as [`Error::OutputWrite`].
pub struct FrameWriter<W: Write> {
    inner: W,
    finished: bool,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            finished: false,
        }
    }

    /// Write one frame: the payload's length as a `u32` LE prefix, then the
    /// payload itself. Zero-size frames are reserved for the end marker, so
    /// an empty payload is rejected.
    pub fn write_frame(&mut self, payload: &[u8]) -> Result<()> {
        debug_assert!(!self.finished, "frame written after the end marker");
        if payload.is_empty() {
            return Err(Error::codec("codec produced an empty payload"));
        }
        let len = u32::try_from(payload.len()).map_err(|_| {
            Error::codec(format!(
                "compressed payload of {} bytes does not fit the u32 frame prefix",
                payload.len()
            ))
        })?;
        self.write_all(&len.to_le_bytes())?;
        self.write_all(payload)
    }

    /// Write the end-of-data marker and flush the sink.
    ///
    /// Every valid stream ends with exactly one marker, including the stream
    /// of an empty input.
    pub fn finish(&mut self) -> Result<()> {
        debug_assert!(!self.finished, "end marker written twice");
        self.finished = true;
        self.write_all(&0u32.to_le_bytes())?;
        self.inner.flush().map_err(|source| Error::OutputWrite { source })
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner
            .write_all(bytes)
            .map_err(|source| Error::OutputWrite { source })
    }
}

/// Reads frames back until the end-of-data marker.
///
/// `frame_limit` bounds a single payload. Streams produced with chunk size C
/// never exceed the codec's worst-case bound for C, so a larger prefix means
/// corruption (or a mismatched config) and is rejected before any allocation
/// happens.
pub struct FrameReader<R: Read> {
    inner: R,
    frame_limit: u32,
    done: bool,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R, frame_limit: u32) -> Self {
        Self {
            inner,
            frame_limit,
            done: false,
        }
    }

    /// Next frame payload, or `None` once the end marker has been consumed.
    ///
    /// EOF before the marker, whether in a prefix or mid-payload, is
    /// [`Error::Truncated`]: a compliant stream always terminates with the
    /// zero prefix.
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>> {
        if self.done {
            return Ok(None);
        }

        let mut prefix = [0u8; FRAME_PREFIX_SIZE];
        self.inner.read_exact(&mut prefix).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => {
                Error::truncated("stream ended before the end-of-data marker")
            }
            _ => Error::InputRead { source: e },
        })?;

        let len = u32::from_le_bytes(prefix);
        if len == 0 {
            self.done = true;
            return Ok(None);
        }
        if len > self.frame_limit {
            return Err(Error::FrameTooLarge {
                len,
                limit: self.frame_limit,
            });
        }

        let mut payload = vec![0u8; len as usize];
        self.inner.read_exact(&mut payload).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => {
                Error::truncated(format!("frame payload cut short, expected {len} bytes"))
            }
            _ => Error::InputRead { source: e },
        })?;
        Ok(Some(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn write_stream(frames: &[&[u8]]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut writer = FrameWriter::new(&mut out);
        for frame in frames {
            writer.write_frame(frame).unwrap();
        }
        writer.finish().unwrap();
        out
    }

    #[test]
    fn roundtrip_two_frames() {
        let bytes = write_stream(&[b"hello", b"world!"]);
        // 4 + 5 + 4 + 6 + 4 marker bytes.
        assert_eq!(bytes.len(), 23);
        assert_eq!(&bytes[bytes.len() - 4..], &[0, 0, 0, 0]);

        let mut reader = FrameReader::new(Cursor::new(bytes), 1024);
        assert_eq!(reader.next_frame().unwrap().unwrap(), b"hello");
        assert_eq!(reader.next_frame().unwrap().unwrap(), b"world!");
        assert!(reader.next_frame().unwrap().is_none());
        // Idempotent after the marker.
        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn marker_only_stream() {
        let bytes = write_stream(&[]);
        assert_eq!(bytes, vec![0, 0, 0, 0]);
        let mut reader = FrameReader::new(Cursor::new(bytes), 1024);
        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn empty_payload_is_rejected() {
        let mut writer = FrameWriter::new(Vec::new());
        assert!(matches!(
            writer.write_frame(b""),
            Err(Error::Codec { .. })
        ));
    }

    #[test]
    fn eof_in_prefix_is_truncation() {
        let mut bytes = write_stream(&[b"abc"]);
        bytes.truncate(bytes.len() - 4); // drop the end marker
        let mut reader = FrameReader::new(Cursor::new(bytes), 1024);
        assert_eq!(reader.next_frame().unwrap().unwrap(), b"abc");
        assert!(matches!(
            reader.next_frame(),
            Err(Error::Truncated { .. })
        ));
    }

    #[test]
    fn eof_in_payload_is_truncation() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&10u32.to_le_bytes());
        bytes.extend_from_slice(b"only5");
        let mut reader = FrameReader::new(Cursor::new(bytes), 1024);
        assert!(matches!(
            reader.next_frame(),
            Err(Error::Truncated { .. })
        ));
    }

    #[test]
    fn oversized_prefix_is_rejected_before_allocation() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        let mut reader = FrameReader::new(Cursor::new(bytes), 4096);
        assert!(matches!(
            reader.next_frame(),
            Err(Error::FrameTooLarge { len: u32::MAX, limit: 4096 })
        ));
    }
}
