use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::bits::{bytes_to_bits, BitSequence};
use crate::error::{FrameError, Result};
use crate::reader::Deframer;

/// Frame header: payload length as a big-endian `u32`.
pub const HEADER_SIZE: usize = 4;

/// Header width in bits.
pub const HEADER_BITS: usize = HEADER_SIZE * 8;

/// Default maximum payload size: anything the 32-bit header can express.
pub const DEFAULT_MAX_PAYLOAD: usize = u32::MAX as usize;

/// Configuration for frame decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Upper bound on the header value, applied on top of the capacity bound.
    /// Default: `u32::MAX`, i.e. only the carrier capacity limits the payload.
    pub max_payload_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}

/// Encode a message into its framed bit sequence.
///
/// Wire format:
/// ```text
/// ┌──────────────────────┬──────────────────────────────┐
/// │ Length (32 bits, BE) │ Payload (8 * Length bits)    │
/// │ payload byte count   │ UTF-8 bytes, MSB first       │
/// └──────────────────────┴──────────────────────────────┘
/// ```
pub fn frame(message: &str) -> Result<BitSequence> {
    let payload = message.as_bytes();
    let len = u32::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLarge {
        size: payload.len(),
        max: DEFAULT_MAX_PAYLOAD,
    })?;

    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    buf.put_u32(len);
    buf.put_slice(payload);

    trace!(payload_bytes = payload.len(), "framed payload");
    Ok(bytes_to_bits(&buf))
}

/// Frame an arbitrary byte source, which must hold UTF-8 text.
pub fn frame_bytes(data: &[u8]) -> Result<BitSequence> {
    let message = std::str::from_utf8(data).map_err(FrameError::EncodingError)?;
    frame(message)
}

/// Number of bits a frame carrying `payload_len` bytes occupies.
pub fn frame_bit_len(payload_len: usize) -> usize {
    payload_len.saturating_mul(8).saturating_add(HEADER_BITS)
}

/// Largest payload, in bytes, that fits into `capacity_bits` after the header.
pub fn max_payload_bytes(capacity_bits: usize) -> usize {
    capacity_bits.saturating_sub(HEADER_BITS) / 8
}

/// Decode a framed bit sequence back into its message.
///
/// `capacity_bits` is the size of the carrier the bits were read from; the
/// header is rejected when it promises more than that carrier could hold.
pub fn deframe(bits: &[u8], capacity_bits: usize) -> Result<String> {
    deframe_with_config(bits, capacity_bits, FrameConfig::default())
}

/// Decode a framed bit sequence with explicit configuration.
pub fn deframe_with_config(
    bits: &[u8],
    capacity_bits: usize,
    config: FrameConfig,
) -> Result<String> {
    Deframer::with_config(bits.iter().copied(), capacity_bits, config).decode()
}
