//! Length-prefixed bit framing for LSB steganography payloads.
//!
//! Every hidden message is framed as:
//! - A 32-bit big-endian payload length (in bytes)
//! - The UTF-8 payload bytes
//!
//! Both parts are flattened into a single bit sequence, most-significant bit
//! first within each byte. The pixel layer maps those bits 1:1 onto channel LSBs.

pub mod bits;
pub mod codec;
pub mod error;
pub mod reader;

pub use bits::{bits_to_bytes, bytes_to_bits, BitSequence};
pub use codec::{
    deframe, deframe_with_config, frame, frame_bit_len, frame_bytes, max_payload_bytes,
    FrameConfig, DEFAULT_MAX_PAYLOAD, HEADER_BITS, HEADER_SIZE,
};
pub use error::{FrameError, Result};
pub use reader::{DecodeState, Deframer};
