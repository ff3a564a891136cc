use std::fmt;

use crate::error::{Result, StegError};
use crate::traversal::Traversal;

/// Channel layout of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    Rgb,
    Rgba,
}

impl PixelLayout {
    /// Interleaved bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, PixelLayout::Rgba)
    }
}

impl fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelLayout::Rgb => f.write_str("RGB"),
            PixelLayout::Rgba => f.write_str("RGBA"),
        }
    }
}

/// A color channel that carries hidden bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Visit order within a pixel.
    pub const ORDER: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Byte offset of this channel inside an interleaved pixel.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Number of LSB slots per pixel (R, G, B).
pub const SLOTS_PER_PIXEL: usize = 3;

/// A row-major grid of 8-bit RGB or RGBA pixels.
///
/// Pixels are stored interleaved, top row first, so the byte for channel `c`
/// of pixel `(x, y)` lives at `(y * width + x) * layout.channels() + c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Create a grid with every channel set to zero.
    pub fn new(width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            width,
            height,
            layout,
            data: vec![0; raw_len(width, height, layout)],
        }
    }

    /// Wrap an existing interleaved buffer.
    pub fn from_raw(width: u32, height: u32, layout: PixelLayout, data: Vec<u8>) -> Result<Self> {
        let expected = raw_len(width, height, layout);
        if data.len() != expected {
            return Err(StegError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Total LSB slots: three per pixel, alpha excluded.
    pub fn capacity(&self) -> usize {
        self.pixel_count() * SLOTS_PER_PIXEL
    }

    /// Channels of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let start = self.pixel_offset(x, y)?;
        Some(&self.data[start..start + self.layout.channels()])
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        let start = self.pixel_offset(x, y)?;
        let end = start + self.layout.channels();
        Some(&mut self.data[start..end])
    }

    /// Slots of this grid in protocol order.
    pub fn traversal(&self) -> Traversal {
        Traversal::new(self.width, self.height)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn pixel_offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.layout.channels())
    }
}

fn raw_len(width: u32, height: u32, layout: PixelLayout) -> usize {
    width as usize * height as usize * layout.channels()
}
