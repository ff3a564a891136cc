use crate::error::{FrameError, Result};

/// An ordered sequence of single-bit values.
///
/// Each element is stored as a `u8` holding `0` or `1`. Anything pushed is
/// masked down to its lowest bit, so the invariant holds for every
/// constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSequence {
    bits: Vec<u8>,
}

impl BitSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sequence with room for `capacity` bits.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Append a bit. Only the lowest bit of `bit` is kept.
    pub fn push(&mut self, bit: u8) {
        self.bits.push(bit & 1);
    }

    /// Append all eight bits of `byte`, most significant first.
    pub fn push_byte(&mut self, byte: u8) {
        for shift in (0..8).rev() {
            self.bits.push((byte >> shift) & 1);
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterate the bits in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = u8> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    /// Reassemble the sequence into bytes, MSB first.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bits_to_bytes(&self.bits)
    }
}

impl FromIterator<u8> for BitSequence {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().map(|bit| bit & 1).collect(),
        }
    }
}

impl IntoIterator for BitSequence {
    type Item = u8;
    type IntoIter = std::vec::IntoIter<u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.into_iter()
    }
}

impl<'a> IntoIterator for &'a BitSequence {
    type Item = u8;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter().copied()
    }
}

/// Expand bytes into bits, bit 7 down to bit 0 for each byte.
pub fn bytes_to_bits(data: &[u8]) -> BitSequence {
    let mut bits = BitSequence::with_capacity(data.len() * 8);
    for &byte in data {
        bits.push_byte(byte);
    }
    bits
}

/// Collapse bits back into bytes, eight at a time, MSB first.
///
/// Fails with [`FrameError::MalformedInput`] when `bits.len()` is not a
/// multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Result<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return Err(FrameError::MalformedInput { len: bits.len() });
    }
    Ok(bits.chunks_exact(8).map(pack_byte).collect())
}

pub(crate) fn pack_byte(chunk: &[u8]) -> u8 {
    chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1))
}
