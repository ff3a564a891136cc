//! Hide text in the least-significant bits of PNG images.
//!
//! pngsteg embeds a length-prefixed UTF-8 message into the LSBs of an
//! image's R, G and B channels and recovers it losslessly.
//!
//! # Crate Structure
//!
//! - [`frame`]: Length-prefixed bit framing (header + payload, MSB first)
//! - [`pixel`]: Pixel grid, traversal order, LSB encode/decode
//! - [`image`]: PNG loading and saving (behind `image` feature)

/// Re-export frame types.
pub mod frame {
    pub use pngsteg_frame::*;
}

/// Re-export pixel codec types.
pub mod pixel {
    pub use pngsteg_pixel::*;
}

/// Re-export image I/O types (requires `image` feature).
#[cfg(feature = "image")]
pub mod image {
    pub use pngsteg_image::*;
}

pub use pngsteg_pixel::{decode, encode, PixelGrid, PixelLayout, StegError};
