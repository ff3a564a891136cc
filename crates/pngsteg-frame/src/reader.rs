use tracing::{debug, trace};

use crate::bits::pack_byte;
use crate::codec::{max_payload_bytes, FrameConfig, HEADER_SIZE};
use crate::error::{FrameError, Result};

/// Where a [`Deframer`] is in decoding a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    /// Pulling the 32 header bits.
    ReadingHeader,
    /// Header read; checking it against the carrier capacity.
    ValidatingLength { len: u32 },
    /// Pulling `len` payload bytes.
    ReadingPayload { len: usize },
    /// A message was decoded.
    Decoded,
    /// Decoding stopped on an error; `reason` is [`FrameError::reason`].
    Failed { reason: &'static str },
}

/// Decodes a frame from a lazy bit stream.
///
/// Pulls exactly as many bits as the frame needs: 32 for the header, then
/// eight per payload byte. Bits after the frame are never touched, so
/// decode cost tracks the payload size rather than the carrier size.
pub struct Deframer<I> {
    bits: I,
    capacity_bits: usize,
    config: FrameConfig,
    state: DecodeState,
    consumed: usize,
}

impl<I: Iterator<Item = u8>> Deframer<I> {
    /// Create a deframer with default configuration.
    pub fn new(bits: I, capacity_bits: usize) -> Self {
        Self::with_config(bits, capacity_bits, FrameConfig::default())
    }

    /// Create a deframer with explicit configuration.
    pub fn with_config(bits: I, capacity_bits: usize, config: FrameConfig) -> Self {
        Self {
            bits,
            capacity_bits,
            config,
            state: DecodeState::ReadingHeader,
            consumed: 0,
        }
    }

    /// Decode one frame and return its message.
    pub fn decode(&mut self) -> Result<String> {
        let result = self.run();
        if let Err(err) = &result {
            trace!(error = %err, consumed = self.consumed, "deframe failed");
            self.transition(DecodeState::Failed {
                reason: err.reason(),
            });
        }
        result
    }

    /// Current decode state.
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Number of bits pulled from the stream so far.
    pub fn bits_consumed(&self) -> usize {
        self.consumed
    }

    /// Consume the deframer and return the underlying bit stream.
    pub fn into_inner(self) -> I {
        self.bits
    }

    fn run(&mut self) -> Result<String> {
        self.transition(DecodeState::ReadingHeader);
        let header = self.take_bytes(HEADER_SIZE)?;
        let len = header
            .iter()
            .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte));

        self.transition(DecodeState::ValidatingLength { len });
        let max = max_payload_bytes(self.capacity_bits).min(self.config.max_payload_size);
        let len = usize::try_from(len)
            .ok()
            .filter(|&n| n <= max)
            .ok_or(FrameError::InvalidHeader { len, max })?;

        self.transition(DecodeState::ReadingPayload { len });
        let payload = self.take_bytes(len)?;
        let message = String::from_utf8(payload).map_err(FrameError::InvalidEncoding)?;

        self.transition(DecodeState::Decoded);
        debug!(
            payload_bytes = len,
            bits_consumed = self.consumed,
            "deframed message"
        );
        Ok(message)
    }

    fn take_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let needed = count.saturating_mul(8);
        // The header is untrusted; reserve only what the stream can still supply.
        let mut out = Vec::with_capacity(count.min(self.bits.size_hint().0 / 8));
        let mut chunk = [0u8; 8];
        let mut taken = 0usize;

        for _ in 0..count {
            for slot in chunk.iter_mut() {
                *slot = self.bits.next().ok_or(FrameError::TruncatedStream {
                    needed,
                    available: taken,
                })?;
                taken += 1;
                self.consumed += 1;
            }
            out.push(pack_byte(&chunk));
        }
        Ok(out)
    }

    fn transition(&mut self, next: DecodeState) {
        trace!(from = ?self.state, to = ?next, "deframe state");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::bits::bytes_to_bits;
    use crate::codec::{frame, HEADER_BITS};

    #[test]
    fn decode_reaches_decoded_state() {
        let bits = frame("ok").unwrap();
        let mut deframer = Deframer::new(bits.iter(), bits.len());

        assert_eq!(deframer.state(), DecodeState::ReadingHeader);
        assert_eq!(deframer.decode().unwrap(), "ok");
        assert_eq!(deframer.state(), DecodeState::Decoded);
        assert_eq!(deframer.bits_consumed(), HEADER_BITS + 16);
    }

    #[test]
    fn decode_pulls_no_more_than_the_frame() {
        let pulled = Cell::new(0usize);
        let bits = frame("xyz").unwrap();
        // Pad with a long tail the decoder must never reach.
        let stream = bits
            .iter()
            .chain(std::iter::repeat(1).take(10_000))
            .inspect(|_| pulled.set(pulled.get() + 1));

        let mut deframer = Deframer::new(stream, 1 << 20);
        assert_eq!(deframer.decode().unwrap(), "xyz");
        assert_eq!(pulled.get(), HEADER_BITS + 24);
    }

    #[test]
    fn invalid_header_stops_before_payload() {
        // Header = 0xFFFFFFFF, far beyond any small carrier.
        let stream = std::iter::repeat(1u8).take(HEADER_BITS + 64);
        let mut deframer = Deframer::new(stream, HEADER_BITS + 64);

        let err = deframer.decode().unwrap_err();
        assert!(matches!(
            err,
            FrameError::InvalidHeader {
                len: u32::MAX,
                max: 8
            }
        ));
        assert_eq!(
            deframer.state(),
            DecodeState::Failed {
                reason: "invalid header"
            }
        );
        assert_eq!(deframer.bits_consumed(), HEADER_BITS);
    }

    #[test]
    fn exhausted_stream_fails() {
        let mut deframer = Deframer::new(std::iter::empty::<u8>(), 0);
        let err = deframer.decode().unwrap_err();
        assert!(matches!(
            err,
            FrameError::TruncatedStream {
                needed: 32,
                available: 0
            }
        ));
        assert_eq!(
            deframer.state(),
            DecodeState::Failed {
                reason: "truncated stream"
            }
        );
    }

    #[test]
    fn oversized_header_on_short_stream_is_truncated() {
        // Header = 0xFFFFFFFF followed by three payload bits, with no carrier bound.
        let stream = std::iter::repeat(1u8).take(HEADER_BITS + 3);
        let mut deframer = Deframer::new(stream, usize::MAX);

        let err = deframer.decode().unwrap_err();
        match err {
            FrameError::TruncatedStream { needed, available } => {
                assert_eq!(needed, (u32::MAX as usize).saturating_mul(8));
                assert_eq!(available, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(deframer.bits_consumed(), HEADER_BITS + 3);
    }

    #[test]
    fn invalid_utf8_payload_records_reason() {
        let mut bits = bytes_to_bits(&[0, 0, 0, 1]);
        for bit in bytes_to_bits(&[0xFF]).iter() {
            bits.push(bit);
        }

        let mut deframer = Deframer::new(bits.iter(), bits.len());
        let err = deframer.decode().unwrap_err();
        assert!(matches!(err, FrameError::InvalidEncoding(_)));
        assert_eq!(
            deframer.state(),
            DecodeState::Failed {
                reason: "invalid encoding"
            }
        );
    }

    #[test]
    fn into_inner_returns_remaining_bits() {
        let mut bits = frame("a").unwrap();
        bits.push(1);
        bits.push(0);

        let mut deframer = Deframer::new(bits.iter(), 1024);
        deframer.decode().unwrap();
        let rest: Vec<u8> = deframer.into_inner().collect();
        assert_eq!(rest, vec![1, 0]);
    }
}
