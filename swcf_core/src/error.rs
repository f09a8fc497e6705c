//! Error types for SWCF sessions.
//!
//! Every variant is fatal to the session that raised it: sessions are
//! fail-fast and never retry, since retrying a local file or codec failure
//! without external remediation is not meaningful. Partial output files are
//! left on disk as-is.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The error type for SWCF operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Input file could not be opened for reading.
    #[error("cannot open input file {path:?}: {source}")]
    InputOpen {
        /// Path that failed to open.
        path: PathBuf,
        source: io::Error,
    },

    /// Output file could not be created.
    #[error("cannot create output file {path:?}: {source}")]
    OutputOpen {
        /// Path that failed to open.
        path: PathBuf,
        source: io::Error,
    },

    /// The input yielded fewer bytes than its length predicted: the file
    /// shrank mid-session or the source is not read-consistent.
    #[error("short read: wanted {expected} bytes for the current chunk, got {got}")]
    ShortRead {
        /// Bytes requested for the chunk being filled.
        expected: usize,
        /// Bytes actually read before EOF.
        got: usize,
    },

    /// Read syscall failure on the input (distinct from a short read).
    #[error("input read error: {source}")]
    InputRead { source: io::Error },

    /// The block codec rejected a chunk or payload.
    #[error("codec failure: {message}")]
    Codec {
        /// Description from the underlying codec.
        message: String,
    },

    /// Write failure on the output (disk full, closed pipe, ...).
    #[error("output write error: {source}")]
    OutputWrite { source: io::Error },

    /// Compressed stream ended before the zero-size end-of-data marker.
    #[error("truncated stream: {context}")]
    Truncated {
        /// Where in the stream the truncation was detected.
        context: String,
    },

    /// A frame declared a payload larger than the session's limit allows.
    #[error("frame payload of {len} bytes exceeds the {limit} byte limit")]
    FrameTooLarge {
        /// Length declared by the frame's size prefix.
        len: u32,
        /// Worst-case payload bound for the session's chunk size.
        limit: u32,
    },

    /// Invalid chunking configuration.
    #[error("invalid configuration: {message}")]
    Config {
        /// Which invariant was violated.
        message: String,
    },
}

/// Result type alias for SWCF operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a codec failure from any displayable codec error.
    pub fn codec(message: impl std::fmt::Display) -> Self {
        Self::Codec {
            message: message.to_string(),
        }
    }

    /// Create a truncated-stream error.
    pub fn truncated(context: impl Into<String>) -> Self {
        Self::Truncated {
            context: context.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
