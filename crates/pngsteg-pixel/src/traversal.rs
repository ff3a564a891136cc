use std::iter::FusedIterator;

use crate::grid::{Channel, PixelLayout, SLOTS_PER_PIXEL};

/// One LSB slot: a channel of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub x: u32,
    pub y: u32,
    pub channel: Channel,
}

impl Slot {
    /// Byte index of this slot in an interleaved buffer of the given width.
    pub fn offset(&self, width: u32, layout: PixelLayout) -> usize {
        (self.y as usize * width as usize + self.x as usize) * layout.channels()
            + self.channel.index()
    }
}

/// Iterates LSB slots in protocol order.
///
/// Rows top to bottom, pixels left to right, then R, G, B within each pixel.
/// Encode and decode both walk this iterator, so any change here breaks
/// every image written before it.
#[derive(Debug, Clone)]
pub struct Traversal {
    width: u32,
    next: usize,
    len: usize,
}

impl Traversal {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            next: 0,
            len: width as usize * height as usize * SLOTS_PER_PIXEL,
        }
    }
}

impl Iterator for Traversal {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        if self.next >= self.len {
            return None;
        }
        let pixel = self.next / SLOTS_PER_PIXEL;
        let channel = Channel::ORDER[self.next % SLOTS_PER_PIXEL];
        self.next += 1;

        let width = self.width as usize;
        Some(Slot {
            x: (pixel % width) as u32,
            y: (pixel / width) as u32,
            channel,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Traversal {}

impl FusedIterator for Traversal {}
