//! SWCF: sliding-window compression format.
//!
//! Compresses a file into a headerless sequence of length-prefixed
//! compressed blocks. A fixed ring buffer keeps a window of prior raw input
//! alive across blocks, so a block codec with cross-chunk history reaches
//! near-whole-stream ratios while the output stays strictly sequential.

pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod reader;
pub mod ring;
pub mod writer;

pub use codec::Codec;
pub use config::{
    ChunkingConfig, DEFAULT_CHUNK_SIZE, DEFAULT_HISTORY_SLOTS, HISTORY_WINDOW_BYTES,
};
pub use error::{Error, Result};
pub use frame::{FrameReader, FrameWriter, FRAME_PREFIX_SIZE};
pub use reader::{Decompressor, DecompressSummary};
pub use ring::RingBuffer;
pub use writer::{CompressSummary, Compressor};
