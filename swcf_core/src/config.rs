//! Chunking configuration and derived ring-buffer sizing.
//!
//! One `ChunkingConfig` fixes the geometry of a whole session: how many raw
//! bytes each chunk may hold, and how many chunk slots of history stay
//! resident behind the write cursor. Buffer capacity and the wraparound
//! threshold are derived from it rather than hard-coded, and the history
//! invariant is checked when a session is constructed.

use crate::error::{Error, Result};

/// Default raw bytes per chunk: 512 KiB.
pub const DEFAULT_CHUNK_SIZE: u32 = 512 * 1024;

/// Default number of history slots retained behind the write cursor.
pub const DEFAULT_HISTORY_SLOTS: u32 = 8;

/// Trailing window of raw bytes a codec may reference when compressing the
/// next chunk. 64 KiB is the LZ4 streaming window; the high-ratio codec is
/// fed the same window so both modes share one ring discipline.
pub const HISTORY_WINDOW_BYTES: u32 = 64 * 1024;

/// Upper bound on `chunk_size`, leaving the u32 frame prefix enough headroom
/// for the codecs' worst-case expansion of an incompressible chunk.
pub const MAX_CHUNK_SIZE: u32 = 1 << 30;

/// Sizing of one session's ring buffer.
///
/// The ring holds `history_slots + 1` fixed slots of `chunk_size` bytes
/// each. The write cursor advances one slot per chunk and wraps to 0 instead
/// of entering the spare final slot, so a slot is reused only after
/// `history_slots` further placements. With the defaults this reproduces the
/// classic streaming-LZ4 sizing of 8 message slots plus one spare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Maximum raw bytes per chunk.
    pub chunk_size: u32,
    /// Chunk slots of history kept intact behind the cursor.
    pub history_slots: u32,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            history_slots: DEFAULT_HISTORY_SLOTS,
        }
    }
}

impl ChunkingConfig {
    /// Build a validated config.
    pub fn new(chunk_size: u32, history_slots: u32) -> Result<Self> {
        let config = Self {
            chunk_size,
            history_slots,
        };
        config.validate()?;
        Ok(config)
    }

    /// Total ring capacity in bytes: `(history_slots + 1) * chunk_size`.
    pub fn capacity(&self) -> usize {
        (self.history_slots as usize + 1) * self.chunk_size as usize
    }

    /// Cursor threshold past which placement wraps back to offset 0.
    ///
    /// Equal to `capacity - chunk_size`: the spare final slot is never
    /// handed out, it only guarantees separation ahead of the live history.
    pub fn wrap_limit(&self) -> usize {
        self.capacity() - self.chunk_size as usize
    }

    /// Bytes of the previous chunk handed to the codec as history.
    pub fn history_window(&self) -> usize {
        HISTORY_WINDOW_BYTES.min(self.chunk_size) as usize
    }

    /// Check the configuration invariants.
    ///
    /// Two things must hold for the ring discipline to be sound:
    /// - at least two distinct slots are in rotation, so a wrap never hands
    ///   out the slot that still carries the previous chunk;
    /// - the separation guaranteed before a slot is reused,
    ///   `(history_slots - 1) * chunk_size` bytes, covers the history window
    ///   the codec will actually reference.
    ///
    /// Anyone changing `chunk_size`, `history_slots`, or the codec window
    /// must keep this inequality true; it is re-derived here instead of
    /// trusting any particular sizing.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::config("chunk size must be nonzero"));
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(Error::config(format!(
                "chunk size {} exceeds the {} byte maximum",
                self.chunk_size, MAX_CHUNK_SIZE
            )));
        }
        if self.history_slots < 2 {
            return Err(Error::config(
                "at least two history slots are required so wraparound never \
                 reuses the slot holding the previous chunk",
            ));
        }

        let capacity = (self.history_slots as u64 + 1) * self.chunk_size as u64;
        if capacity > isize::MAX as u64 {
            return Err(Error::config(format!(
                "ring capacity of {capacity} bytes is not addressable"
            )));
        }

        let separation = (self.history_slots as u64 - 1) * self.chunk_size as u64;
        let window = self.history_window() as u64;
        if separation < window {
            return Err(Error::config(format!(
                "history separation of {separation} bytes does not cover the \
                 {window} byte codec window"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_reproduces_reference_sizing() {
        let config = ChunkingConfig::default();
        config.validate().unwrap();
        // 8 slots + 1 spare of 512 KiB each.
        assert_eq!(config.capacity(), 9 * 512 * 1024);
        assert_eq!(config.wrap_limit(), 8 * 512 * 1024);
        assert_eq!(config.history_window(), 64 * 1024);
    }

    #[test]
    fn window_clamps_to_small_chunks() {
        let config = ChunkingConfig::new(4096, 8).unwrap();
        assert_eq!(config.history_window(), 4096);
    }

    #[test]
    fn rejects_degenerate_configs() {
        assert!(ChunkingConfig::new(0, 8).is_err());
        assert!(ChunkingConfig::new(4096, 0).is_err());
        assert!(ChunkingConfig::new(4096, 1).is_err());
        assert!(ChunkingConfig::new(MAX_CHUNK_SIZE + 1, 8).is_err());
    }

    #[test]
    fn minimal_slot_count_is_accepted() {
        // Two slots in rotation: the previous chunk survives exactly until
        // the next placement consumes it as history.
        let config = ChunkingConfig::new(128 * 1024, 2).unwrap();
        assert_eq!(config.capacity(), 3 * 128 * 1024);
    }
}
