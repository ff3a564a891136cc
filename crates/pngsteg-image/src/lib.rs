//! PNG loading and saving for pngsteg pixel grids.
//!
//! This is the file-format boundary. It turns PNG files into validated
//! [`PixelGrid`]s (8-bit RGB or RGBA only) and writes grids back out
//! losslessly. The codec crates never see a path or a file format.

pub mod convert;
pub mod error;
pub mod png;

pub use convert::{color_type, grid_from_image};
pub use error::{ImageIoError, Result};
pub use png::{decode_png, encode_png, load_png, save_png};

pub use pngsteg_pixel::PixelGrid;
