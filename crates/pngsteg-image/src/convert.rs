use image::{ColorType, DynamicImage};
use pngsteg_pixel::{PixelGrid, PixelLayout};

use crate::error::{ImageIoError, Result};

/// Convert a decoded image into a pixel grid.
///
/// Only 8-bit RGB and RGBA images are accepted; everything else fails with
/// [`ImageIoError::UnsupportedColor`] rather than being converted.
pub fn grid_from_image(image: DynamicImage) -> Result<PixelGrid> {
    let grid = match image.color() {
        ColorType::Rgb8 => {
            let buf = image.into_rgb8();
            PixelGrid::from_raw(buf.width(), buf.height(), PixelLayout::Rgb, buf.into_raw())?
        }
        ColorType::Rgba8 => {
            let buf = image.into_rgba8();
            PixelGrid::from_raw(buf.width(), buf.height(), PixelLayout::Rgba, buf.into_raw())?
        }
        other => {
            return Err(ImageIoError::UnsupportedColor {
                color: format!("{other:?}"),
            })
        }
    };
    Ok(grid)
}

/// The `image` color type matching a grid layout.
pub fn color_type(layout: PixelLayout) -> ColorType {
    match layout {
        PixelLayout::Rgb => ColorType::Rgb8,
        PixelLayout::Rgba => ColorType::Rgba8,
    }
}
