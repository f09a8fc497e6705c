//! Fixed-capacity ring buffer holding raw chunks plus their history window.
//!
//! Slots are `chunk_size` bytes wide regardless of how many bytes a chunk
//! actually holds: the cursor advances a full slot per placement, which keeps
//! slot boundaries fixed and the offset arithmetic trivial. The slot handed
//! out by the previous [`RingBuffer::place`] stays byte-identical until
//! `history_slots` further placements, which is what lets a codec keep
//! referencing it as its history window after the next chunk is read in.

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};

/// Ring buffer for one session's chunk data.
pub struct RingBuffer {
    buf: Vec<u8>,
    cursor: usize,
    chunk_size: usize,
    wrap_limit: usize,
}

impl RingBuffer {
    /// Allocate a zeroed ring sized by `config`.
    ///
    /// The config is assumed validated; sessions check it before allocating.
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            buf: vec![0u8; config.capacity()],
            cursor: 0,
            chunk_size: config.chunk_size as usize,
            wrap_limit: config.wrap_limit(),
        }
    }

    /// Reserve the next slot for a chunk of `len` bytes; returns its offset.
    ///
    /// `len` must be in `1..=chunk_size`. The cursor advances by the full
    /// slot width even when `len` is smaller (short final chunk), and wraps
    /// to 0 once it reaches the wrap limit, never into the spare slot.
    pub fn place(&mut self, len: usize) -> Result<usize> {
        if len == 0 || len > self.chunk_size {
            return Err(Error::config(format!(
                "chunk length {len} outside 1..={} slot bounds",
                self.chunk_size
            )));
        }
        let offset = self.cursor;
        debug_assert!(offset + self.chunk_size <= self.buf.len());
        self.cursor += self.chunk_size;
        if self.cursor >= self.wrap_limit {
            self.cursor = 0;
        }
        Ok(offset)
    }

    /// Mutable slot view for filling `len` bytes at `offset`.
    pub fn slot_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        &mut self.buf[offset..offset + len]
    }

    /// Immutable view of `len` bytes at `offset`: a chunk or its history
    /// window. The bytes are exactly what was last written there; nothing in
    /// the ring mutates a slot other than a later placement at that offset.
    pub fn slice(&self, offset: usize, len: usize) -> &[u8] {
        &self.buf[offset..offset + len]
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_ring() -> RingBuffer {
        // 4-byte chunks, 2 history slots + 1 spare = 12 bytes capacity,
        // wrap limit 8.
        let config = ChunkingConfig::new(4, 2).unwrap();
        RingBuffer::new(&config)
    }

    #[test]
    fn place_advances_full_slots_and_wraps() {
        let mut ring = small_ring();
        assert_eq!(ring.capacity(), 12);
        assert_eq!(ring.place(4).unwrap(), 0);
        assert_eq!(ring.place(4).unwrap(), 4);
        // Cursor hit the wrap limit (8), so placement restarts at 0.
        assert_eq!(ring.place(4).unwrap(), 0);
        assert_eq!(ring.place(4).unwrap(), 4);
    }

    #[test]
    fn short_chunk_still_advances_one_slot() {
        let mut ring = small_ring();
        assert_eq!(ring.place(1).unwrap(), 0);
        assert_eq!(ring.place(4).unwrap(), 4);
    }

    #[test]
    fn place_rejects_out_of_bounds_lengths() {
        let mut ring = small_ring();
        assert!(ring.place(0).is_err());
        assert!(ring.place(5).is_err());
    }

    #[test]
    fn wrap_never_clobbers_the_previous_slot() {
        let mut ring = small_ring();
        let a = ring.place(4).unwrap();
        ring.slot_mut(a, 4).copy_from_slice(b"AAAA");
        let b = ring.place(4).unwrap();
        ring.slot_mut(b, 4).copy_from_slice(b"BBBB");

        // Third placement wraps onto slot A; slot B must survive as history.
        let c = ring.place(4).unwrap();
        assert_eq!(c, a);
        ring.slot_mut(c, 4).copy_from_slice(b"CCCC");
        assert_eq!(ring.slice(b, 4), b"BBBB");
    }

    #[test]
    fn slices_return_what_was_written() {
        let mut ring = small_ring();
        let offset = ring.place(3).unwrap();
        ring.slot_mut(offset, 3).copy_from_slice(b"xyz");
        assert_eq!(ring.slice(offset, 3), b"xyz");
    }
}
