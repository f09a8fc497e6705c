use swcf_core::codec::Codec;
use swcf_core::error::Result;

/// No-op codec: frames carry the raw chunk bytes verbatim.
///
/// Useful for:
/// - Verifying the frame format and ring discipline independently of any
///   real codec.
/// - Data that is already compressed (e.g., JPEG, MP4) where further
///   compression would expand the file.
pub struct PassThroughCodec;

impl Codec for PassThroughCodec {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn max_compressed_len(&self, raw_len: usize) -> usize {
        raw_len
    }

    fn compress_chunk(&mut self, _history: &[u8], chunk: &[u8]) -> Result<Vec<u8>> {
        Ok(chunk.to_vec())
    }

    fn decompress_chunk(
        &mut self,
        _history: &[u8],
        payload: &[u8],
        _max_raw: usize,
    ) -> Result<Vec<u8>> {
        Ok(payload.to_vec())
    }
}
