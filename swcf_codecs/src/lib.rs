mod lz4_codec;
mod passthrough;
mod zstd_codec;

pub use lz4_codec::Lz4Codec;
pub use passthrough::PassThroughCodec;
pub use zstd_codec::ZstdCodec;

use swcf_core::Codec;

/// Resolve a codec mode name to a fresh context.
///
/// The frame stream is headerless, so the decode side has to be told which
/// codec produced a file. Every call returns a brand-new context: sessions
/// never share one, and the fast and high-ratio variants in particular never
/// do.
pub fn codec_by_name(name: &str, zstd_level: i32) -> anyhow::Result<Box<dyn Codec>> {
    match name {
        "fast" | "lz4" | "l" => Ok(Box::new(Lz4Codec)),
        "high" | "zstd" | "z" => Ok(Box::new(ZstdCodec::new(zstd_level))),
        "passthrough" | "pass" | "none" => Ok(Box::new(PassThroughCodec)),
        other => anyhow::bail!(
            "unknown codec '{}'. Valid options: fast (lz4), high (zstd), passthrough",
            other
        ),
    }
}
