use std::iter::FusedIterator;

use pngsteg_frame::BitSequence;
use tracing::trace;

use crate::error::{Result, StegError};
use crate::grid::{PixelGrid, PixelLayout};
use crate::traversal::Traversal;

/// Number of LSB slots in `grid`: `width * height * 3`.
pub fn capacity(grid: &PixelGrid) -> usize {
    grid.capacity()
}

/// Write `bits` into the grid's LSBs in protocol order.
///
/// Capacity is checked before any channel is touched; on
/// [`StegError::CapacityExceeded`] the grid is unchanged. Slots past the last
/// bit keep their original values. Returns the number of bits written.
pub fn write(grid: &mut PixelGrid, bits: &BitSequence) -> Result<usize> {
    let capacity = grid.capacity();
    if bits.len() > capacity {
        return Err(StegError::CapacityExceeded {
            needed: bits.len(),
            capacity,
        });
    }

    let width = grid.width();
    let layout = grid.layout();
    let slots = grid.traversal();
    let data = grid.raw_mut();

    for (slot, bit) in slots.zip(bits.iter()) {
        let value = &mut data[slot.offset(width, layout)];
        *value = (*value & 0xFE) | bit;
    }

    trace!(bits = bits.len(), capacity, "wrote lsb slots");
    Ok(bits.len())
}

/// Lazily read the grid's LSBs in protocol order.
pub fn read(grid: &PixelGrid) -> LsbReader<'_> {
    LsbReader::new(grid)
}

/// Pull-based iterator over a grid's LSBs.
///
/// Yields at most `capacity(grid)` bits and then reports exhaustion with
/// `None`. Each call to [`read`] starts from the first slot again.
#[derive(Debug, Clone)]
pub struct LsbReader<'a> {
    data: &'a [u8],
    width: u32,
    layout: PixelLayout,
    slots: Traversal,
    read: usize,
}

impl<'a> LsbReader<'a> {
    fn new(grid: &'a PixelGrid) -> Self {
        Self {
            data: grid.as_raw(),
            width: grid.width(),
            layout: grid.layout(),
            slots: grid.traversal(),
            read: 0,
        }
    }

    /// Bits yielded so far.
    pub fn bits_read(&self) -> usize {
        self.read
    }
}

impl Iterator for LsbReader<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let slot = self.slots.next()?;
        self.read += 1;
        Some(self.data[slot.offset(self.width, self.layout)] & 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl ExactSizeIterator for LsbReader<'_> {}

impl FusedIterator for LsbReader<'_> {}
