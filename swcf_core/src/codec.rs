//! The block-codec adapter seam.

use crate::error::Result;

/// One session's compression (or decompression) context.
///
/// Implementations wrap an external block codec that supports cross-chunk
/// history: compressing chunk *n* may reference `history`, the trailing raw
/// bytes of chunk *n−1* exactly as they still sit in the session's ring
/// buffer. Those bytes must remain byte-identical and resident at the same
/// location from the moment chunk *n−1* was compressed until the call for
/// chunk *n* returns; the ring's wraparound rule exists to guarantee that.
///
/// The value behind `&mut self` is the persistent per-session codec state.
/// Create one context per session and keep it for every chunk of that
/// session. A fresh context per chunk still produces a decodable stream but
/// silently forfeits the cross-chunk compression gains; a context shared
/// between two sessions (or between the fast and high-ratio variants)
/// cross-contaminates dictionary state and is never permitted.
pub trait Codec: Send {
    /// Human-readable codec name for CLI display.
    fn name(&self) -> &'static str;

    /// Worst-case compressed size for a `raw_len`-byte chunk.
    ///
    /// Frames produced by [`Codec::compress_chunk`] always fit this bound;
    /// readers use it to reject corrupt length prefixes early.
    fn max_compressed_len(&self, raw_len: usize) -> usize;

    /// Compress one chunk against the trailing history window.
    ///
    /// `history` is empty for the first chunk of a stream; afterwards it
    /// holds the trailing window of the previous chunk. Both slices point
    /// into the same ring allocation but never overlap.
    fn compress_chunk(&mut self, history: &[u8], chunk: &[u8]) -> Result<Vec<u8>>;

    /// Reverse of [`Codec::compress_chunk`].
    ///
    /// `history` must hold the same window the encoder saw; for a decoder
    /// that means the trailing bytes of the previously *decoded* chunk.
    /// `max_raw` bounds the decoded size (the chunk size the stream was
    /// produced with); payloads decoding beyond it are a codec failure.
    fn decompress_chunk(&mut self, history: &[u8], payload: &[u8], max_raw: usize)
        -> Result<Vec<u8>>;
}
