//! Pixel-grid LSB codec.
//!
//! Maps a framed bit sequence onto the least-significant bits of a pixel
//! grid and reads it back. The traversal order is the protocol contract:
//! rows top to bottom, pixels left to right, channels R → G → B. Alpha is
//! never read or written.

pub mod codec;
pub mod error;
pub mod grid;
pub mod lsb;
pub mod traversal;

pub use codec::{decode, decode_with_config, encode, encode_in_place, EncodeReport};
pub use error::{Result, StegError};
pub use grid::{Channel, PixelGrid, PixelLayout};
pub use lsb::{capacity, read, write, LsbReader};
pub use traversal::{Slot, Traversal};

pub use pngsteg_frame::{FrameConfig, FrameError};
