use lz4_flex::block::{
    compress_into, compress_into_with_dict, decompress_into, decompress_into_with_dict,
    get_maximum_output_size,
};

use swcf_core::codec::Codec;
use swcf_core::error::{Error, Result};

/// LZ4 streaming codec: the fast mode.
///
/// Chunks go through `lz4_flex`'s block format with the history window
/// passed as an external dictionary, so matches can reach back into the
/// previous chunk's bytes in the ring buffer. Bounded latency per chunk,
/// multi-GB/s decode; lower ratio than the zstd mode.
pub struct Lz4Codec;

/// LZ4 references at most the trailing 64 KiB of prior source; longer
/// windows are clamped before the call, mirroring `LZ4_loadDict`'s own
/// truncation.
const LZ4_WINDOW: usize = 64 * 1024;

fn clamp_window(history: &[u8]) -> &[u8] {
    &history[history.len().saturating_sub(LZ4_WINDOW)..]
}

impl Codec for Lz4Codec {
    fn name(&self) -> &'static str {
        "lz4"
    }

    fn max_compressed_len(&self, raw_len: usize) -> usize {
        get_maximum_output_size(raw_len)
    }

    fn compress_chunk(&mut self, history: &[u8], chunk: &[u8]) -> Result<Vec<u8>> {
        let mut out = vec![0u8; get_maximum_output_size(chunk.len())];
        let history = clamp_window(history);
        let written = if history.is_empty() {
            compress_into(chunk, &mut out)
        } else {
            compress_into_with_dict(chunk, &mut out, history)
        }
        .map_err(Error::codec)?;
        out.truncate(written);
        Ok(out)
    }

    fn decompress_chunk(
        &mut self,
        history: &[u8],
        payload: &[u8],
        max_raw: usize,
    ) -> Result<Vec<u8>> {
        let mut out = vec![0u8; max_raw];
        let history = clamp_window(history);
        let written = if history.is_empty() {
            decompress_into(payload, &mut out)
        } else {
            decompress_into_with_dict(payload, &mut out, history)
        }
        .map_err(Error::codec)?;
        out.truncate(written);
        Ok(out)
    }
}
