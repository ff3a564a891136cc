use std::path::PathBuf;

/// Errors that can occur while loading or saving images.
#[derive(Debug, thiserror::Error)]
pub enum ImageIoError {
    /// The input file does not exist.
    #[error("input file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    /// The input bytes are not a recognisable image.
    #[error("input is not a valid image")]
    NotAnImage,

    /// The input is an image, but not a PNG.
    #[error("input must be a PNG file (found {format})")]
    NotPng { format: String },

    /// The PNG uses a pixel format other than 8-bit RGB or RGBA.
    #[error("input must be RGB or RGBA (found {color})")]
    UnsupportedColor { color: String },

    /// The directory an output file should go into does not exist.
    #[error("output path does not exist: {}", path.display())]
    OutputDirMissing { path: PathBuf },

    /// The PNG header could not be read.
    #[error("input is not a valid image: {0}")]
    Header(#[source] ::png::DecodingError),

    /// The PNG data could not be decoded.
    #[error("input is not a valid image: {0}")]
    Decode(#[source] image::ImageError),

    /// The grid could not be encoded as PNG.
    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    /// The decoded pixel buffer did not fit the grid.
    #[error("pixel grid error: {0}")]
    Grid(#[from] pngsteg_pixel::StegError),

    /// An I/O error occurred reading or writing a file.
    #[error("image I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImageIoError>;
