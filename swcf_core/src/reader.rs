//! Sequential decoder: mirrors the compressor's ring discipline over
//! *decoded* bytes.
//!
//! The stream is headerless, so the codec and chunk geometry must be
//! supplied out of band and match the values the encoder ran with. Each
//! decoded chunk is parked in the next ring slot so the following frame can
//! reference its trailing window as history, the mirror image of the
//! encoder's discipline. Matching that discipline is what makes the round
//! trip exact.
//!
//! Decoding walks frames strictly forward and stops at the first zero-size
//! prefix; there is no random access into the stream.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::codec::Codec;
use crate::config::ChunkingConfig;
use crate::error::{Error, Result};
use crate::frame::FrameReader;
use crate::ring::RingBuffer;

/// Totals reported by a finished decompression session.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecompressSummary {
    /// Frames decoded (end marker excluded).
    pub frames: u64,
    /// Raw bytes written to the output.
    pub raw_bytes: u64,
}

/// One streaming decompression session.
pub struct Decompressor {
    frames: FrameReader<BufReader<File>>,
    output: BufWriter<File>,
    ring: RingBuffer,
    codec: Box<dyn Codec>,
    config: ChunkingConfig,
    /// Ring slot of the previously decoded chunk, `(offset, len)`.
    prev: Option<(usize, usize)>,
}

impl Decompressor {
    /// Open both files and bind the session's resources.
    ///
    /// Frame prefixes are validated against the codec's worst-case bound for
    /// the configured chunk size, so a corrupt length is rejected before
    /// any payload allocation.
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

        let output_path = output.as_ref();
        let output = File::create(output_path).map_err(|source| Error::OutputOpen {
            path: output_path.to_path_buf(),
            source,
        })?;

        let limit = codec.max_compressed_len(config.chunk_size as usize);
        let limit = u32::try_from(limit).unwrap_or(u32::MAX);

        Ok(Self {
            frames: FrameReader::new(BufReader::new(input), limit),
            output: BufWriter::new(output),
            ring: RingBuffer::new(&config),
            codec,
            config,
            prev: None,
        })
    }

    /// Decode every frame up to the end marker and return the totals.
    pub fn run(mut self) -> Result<DecompressSummary> {
        let mut summary = DecompressSummary::default();
        let chunk_size = self.config.chunk_size as usize;
        let window = self.config.history_window();

        while let Some(payload) = self.frames.next_frame()? {
            let offset = self.ring.place(chunk_size)?;

            let history: &[u8] = match self.prev {
                Some((prev_offset, prev_len)) => {
                    let take = window.min(prev_len);
                    self.ring.slice(prev_offset + prev_len - take, take)
                }
                None => &[],
            };

            let raw = self.codec.decompress_chunk(history, &payload, chunk_size)?;
            if raw.len() > chunk_size {
                return Err(Error::codec(format!(
                    "frame decoded to {} bytes, above the {chunk_size} byte chunk size",
                    raw.len()
                )));
            }

            // Park the decoded bytes in the ring so the next frame can see
            // them as history.
            self.ring.slot_mut(offset, raw.len()).copy_from_slice(&raw);
            self.output
                .write_all(&raw)
                .map_err(|source| Error::OutputWrite { source })?;

            summary.frames += 1;
            summary.raw_bytes += raw.len() as u64;
            self.prev = Some((offset, raw.len()));
        }

        self.output
            .flush()
            .map_err(|source| Error::OutputWrite { source })?;
        Ok(summary)
    }
}
