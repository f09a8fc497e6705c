//! Stream compression driver: one session from an input file to a frame
//! stream.
//!
//! # Session contract
//! [`Compressor::create`] opens both files, validates the chunk geometry,
//! and allocates the ring buffer and codec context. [`Compressor::run`]
//! consumes the session and drives it to completion: read a chunk into the
//! next ring slot, compress it against the previous chunk's trailing window,
//! emit one frame, repeat until the remaining-size counter hits zero, then
//! write the end-of-data marker. An empty input takes the same path; its
//! entire stream is the 4-byte marker.
//!
//! Every error is fatal to the session. Because `run` takes `self` by
//! value, files, ring, and codec context are released on success and on the
//! first failure alike; partial output is left on disk.

use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::Path;

use crate::codec::Codec;
use crate::config::ChunkingConfig;
use crate::error::{Error, Result};
use crate::frame::{FrameWriter, FRAME_PREFIX_SIZE};
use crate::ring::RingBuffer;

/// Totals reported by a finished compression session.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressSummary {
    /// Chunks read and compressed.
    pub chunks: u64,
    /// Raw input bytes consumed.
    pub raw_bytes: u64,
    /// Bytes written to the output, frame prefixes and end marker included.
    pub compressed_bytes: u64,
}

/// One streaming compression session.
pub struct Compressor {
    input: File,
    frames: FrameWriter<BufWriter<File>>,
    ring: RingBuffer,
    codec: Box<dyn Codec>,
    config: ChunkingConfig,
    /// Unconsumed input bytes; reaches exactly 0 when input is exhausted.
    remaining: u64,
    /// Ring slot of the previous chunk, `(offset, len)`.
    prev: Option<(usize, usize)>,
}

impl Compressor {
    /// Open input and output and bind the session's resources.
    ///
    /// The input must be a regular file: its length seeds the
    /// remaining-size counter that drives loop termination. The output is
    /// created (truncating any existing file) only after the input opened
    /// successfully, so an unreadable input leaves no output behind.
    pub fn create(
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        codec: Box<dyn Codec>,
        config: ChunkingConfig,
    ) -> Result<Self> {
        config.validate()?;

        let input_path = input.as_ref();
        let input = File::open(input_path).map_err(|source| Error::InputOpen {
            path: input_path.to_path_buf(),
            source,
        })?;
        let remaining = input
            .metadata()
            .map_err(|source| Error::InputRead { source })?
            .len();

        let output_path = output.as_ref();
        let output = File::create(output_path).map_err(|source| Error::OutputOpen {
            path: output_path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            input,
            frames: FrameWriter::new(BufWriter::new(output)),
            ring: RingBuffer::new(&config),
            codec,
            config,
            remaining,
            prev: None,
        })
    }

    /// Drive the session to completion and return its totals.
    pub fn run(mut self) -> Result<CompressSummary> {
        let mut summary = CompressSummary::default();
        let chunk_size = self.config.chunk_size as u64;
        let window = self.config.history_window();

        while self.remaining > 0 {
            let want = self.remaining.min(chunk_size) as usize;
            let offset = self.ring.place(want)?;
            self.read_chunk(offset, want)?;

            let chunk = self.ring.slice(offset, want);
            let history: &[u8] = match self.prev {
                Some((prev_offset, prev_len)) => {
                    let take = window.min(prev_len);
                    self.ring.slice(prev_offset + prev_len - take, take)
                }
                None => &[],
            };

            let payload = match self.codec.compress_chunk(history, chunk) {
                Ok(payload) => payload,
                Err(err) => {
                    // No frame for this chunk has been started yet; close
                    // the stream so readers see a well-formed prefix of the
                    // input, then report the failure.
                    let _ = self.frames.finish();
                    return Err(err);
                }
            };

            self.frames.write_frame(&payload)?;
            summary.chunks += 1;
            summary.raw_bytes += want as u64;
            summary.compressed_bytes += (FRAME_PREFIX_SIZE + payload.len()) as u64;
            self.remaining -= want as u64;
            self.prev = Some((offset, want));
        }

        self.frames.finish()?;
        summary.compressed_bytes += FRAME_PREFIX_SIZE as u64;
        Ok(summary)
    }

    /// Fill `ring[offset..offset + want]` from the input.
    ///
    /// A clean EOF before the slot is full means the input shrank under the
    /// remaining-size counter's prediction.
    fn read_chunk(&mut self, offset: usize, want: usize) -> Result<()> {
        let slot = self.ring.slot_mut(offset, want);
        let mut filled = 0;
        while filled < want {
            match self.input.read(&mut slot[filled..]) {
                Ok(0) => {
                    return Err(Error::ShortRead {
                        expected: want,
                        got: filled,
                    })
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(Error::InputRead { source }),
            }
        }
        Ok(())
    }
}
