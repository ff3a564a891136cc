use pngsteg_frame::{frame, frame_bit_len, Deframer, FrameConfig};
use tracing::debug;

use crate::error::{Result, StegError};
use crate::grid::PixelGrid;
use crate::lsb::{read, write};

/// Summary of a successful encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeReport {
    /// UTF-8 length of the hidden message.
    pub payload_bytes: usize,
    /// Header plus payload bits written into the grid.
    pub bits_written: usize,
    /// LSB slots the grid offers.
    pub capacity_bits: usize,
}

impl EncodeReport {
    /// Fraction of the capacity used, in `[0, 1]`.
    pub fn utilization(&self) -> f64 {
        if self.capacity_bits == 0 {
            return 0.0;
        }
        self.bits_written as f64 / self.capacity_bits as f64
    }
}

/// Hide `message` in a copy of `grid`.
///
/// The input grid is left as is. On error no copy is made.
pub fn encode(grid: &PixelGrid, message: &str) -> Result<(PixelGrid, EncodeReport)> {
    check_capacity(grid, message.len())?;
    let mut out = grid.clone();
    let report = encode_in_place(&mut out, message)?;
    Ok((out, report))
}

/// Hide `message` in `grid`, modifying it in place.
///
/// Capacity is checked before framing, so on
/// [`StegError::CapacityExceeded`] the grid is unchanged.
pub fn encode_in_place(grid: &mut PixelGrid, message: &str) -> Result<EncodeReport> {
    let capacity_bits = check_capacity(grid, message.len())?;
    let bits = frame(message)?;
    let bits_written = write(grid, &bits)?;

    debug!(
        width = grid.width(),
        height = grid.height(),
        payload_bytes = message.len(),
        bits_written,
        capacity_bits,
        "encoded message"
    );

    Ok(EncodeReport {
        payload_bytes: message.len(),
        bits_written,
        capacity_bits,
    })
}

/// Extract the message hidden in `grid`.
///
/// A grid whose first 32 LSBs are all zero decodes to the empty string.
pub fn decode(grid: &PixelGrid) -> Result<String> {
    decode_with_config(grid, FrameConfig::default())
}

/// Extract the message hidden in `grid` with explicit frame configuration.
pub fn decode_with_config(grid: &PixelGrid, config: FrameConfig) -> Result<String> {
    let capacity_bits = grid.capacity();
    let mut deframer = Deframer::with_config(read(grid), capacity_bits, config);
    let message = deframer.decode()?;

    debug!(
        width = grid.width(),
        height = grid.height(),
        payload_bytes = message.len(),
        bits_read = deframer.bits_consumed(),
        "decoded message"
    );
    Ok(message)
}

fn check_capacity(grid: &PixelGrid, payload_len: usize) -> Result<usize> {
    let capacity = grid.capacity();
    let needed = frame_bit_len(payload_len);
    if needed > capacity {
        return Err(StegError::CapacityExceeded { needed, capacity });
    }
    Ok(capacity)
}
