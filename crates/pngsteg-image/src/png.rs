use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::io::Reader;
use image::{ImageEncoder, ImageFormat};
use pngsteg_pixel::PixelGrid;
use tracing::debug;

use crate::convert::{color_type, grid_from_image};
use crate::error::{ImageIoError, Result};

/// Load a PNG file into a pixel grid.
///
/// The file must exist, be a PNG, decode cleanly and hold 8-bit RGB or RGBA
/// pixels. All pixels are decoded before the grid is returned.
pub fn load_png(path: impl AsRef<Path>) -> Result<PixelGrid> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ImageIoError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path)?;
    let grid = decode_png(&bytes)?;
    debug!(
        ?path,
        width = grid.width(),
        height = grid.height(),
        layout = %grid.layout(),
        "loaded png"
    );
    Ok(grid)
}

/// Decode in-memory PNG bytes into a pixel grid.
pub fn decode_png(bytes: &[u8]) -> Result<PixelGrid> {
    let reader = Reader::new(Cursor::new(bytes)).with_guessed_format()?;
    match reader.format() {
        Some(ImageFormat::Png) => {}
        Some(other) => {
            return Err(ImageIoError::NotPng {
                format: format!("{other:?}"),
            })
        }
        None => return Err(ImageIoError::NotAnImage),
    }
    check_native_color(bytes)?;

    let image = reader.decode().map_err(ImageIoError::Decode)?;
    grid_from_image(image)
}

/// Reject palette PNGs before the decoder expands them to RGB.
fn check_native_color(bytes: &[u8]) -> Result<()> {
    let reader = ::png::Decoder::new(bytes)
        .read_info()
        .map_err(ImageIoError::Header)?;
    match reader.info().color_type {
        ::png::ColorType::Indexed => Err(ImageIoError::UnsupportedColor {
            color: "Indexed".to_string(),
        }),
        _ => Ok(()),
    }
}

/// Save a pixel grid as a PNG file.
///
/// The parent directory must already exist. Channel values are written
/// unchanged, including alpha for RGBA grids.
pub fn save_png(grid: &PixelGrid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(ImageIoError::OutputDirMissing {
                path: parent.to_path_buf(),
            });
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_png(grid, &mut writer)?;
    writer.flush()?;

    debug!(?path, width = grid.width(), height = grid.height(), "saved png");
    Ok(())
}

/// Encode a pixel grid as in-memory PNG bytes.
pub fn encode_png(grid: &PixelGrid) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_png(grid, &mut out)?;
    Ok(out)
}

fn write_png<W: Write>(grid: &PixelGrid, writer: W) -> Result<()> {
    PngEncoder::new(writer)
        .write_image(
            grid.as_raw(),
            grid.width(),
            grid.height(),
            color_type(grid.layout()),
        )
        .map_err(ImageIoError::Encode)
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, RgbaImage};
    use pngsteg_pixel::PixelLayout;

    use super::*;

    fn sample_grid(layout: PixelLayout) -> PixelGrid {
        let len = 5 * 3 * layout.channels();
        let data = (0..len).map(|i| (i * 13 % 256) as u8).collect();
        PixelGrid::from_raw(5, 3, layout, data).unwrap()
    }

    #[test]
    fn png_bytes_preserve_every_channel() {
        for layout in [PixelLayout::Rgb, PixelLayout::Rgba] {
            let grid = sample_grid(layout);
            let bytes = encode_png(&grid).unwrap();
            assert_eq!(decode_png(&bytes).unwrap(), grid);
        }
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode_png(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ImageIoError::NotAnImage));
    }

    #[test]
    fn decode_rejects_other_formats() {
        let mut bmp = b"BM".to_vec();
        bmp.extend_from_slice(&[0; 64]);
        let err = decode_png(&bmp).unwrap_err();
        assert!(matches!(err, ImageIoError::NotPng { ref format } if format == "Bmp"));
    }

    #[test]
    fn decode_rejects_grayscale_png() {
        let mut bytes = Vec::new();
        let gray = GrayImage::new(4, 4);
        PngEncoder::new(&mut bytes)
            .write_image(gray.as_raw(), 4, 4, image::ColorType::L8)
            .unwrap();

        let err = decode_png(&bytes).unwrap_err();
        assert!(matches!(err, ImageIoError::UnsupportedColor { .. }));
    }

    #[test]
    fn decode_rejects_truncated_png() {
        let bytes = encode_png(&sample_grid(PixelLayout::Rgb)).unwrap();
        let err = decode_png(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, ImageIoError::Decode(_) | ImageIoError::Header(_)));
    }

    #[test]
    fn decode_rejects_indexed_png() {
        let mut bytes = Vec::new();
        {
            let mut encoder = ::png::Encoder::new(&mut bytes, 2, 2);
            encoder.set_color(::png::ColorType::Indexed);
            encoder.set_depth(::png::BitDepth::Eight);
            encoder.set_palette(vec![0, 0, 0, 255, 255, 255]);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 1, 1, 0]).unwrap();
            writer.finish().unwrap();
        }

        let err = decode_png(&bytes).unwrap_err();
        assert!(matches!(
            err,
            ImageIoError::UnsupportedColor { ref color } if color == "Indexed"
        ));
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");

        let buf = RgbaImage::from_raw(2, 2, (0..16).collect()).unwrap();
        let grid = grid_from_image(image::DynamicImage::ImageRgba8(buf)).unwrap();

        save_png(&grid, &path).unwrap();
        assert_eq!(load_png(&path).unwrap(), grid);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_png(dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, ImageIoError::NotFound { .. }));
    }

    #[test]
    fn save_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.png");
        let err = save_png(&sample_grid(PixelLayout::Rgb), &path).unwrap_err();
        assert!(matches!(err, ImageIoError::OutputDirMissing { .. }));
        assert!(!path.exists());
    }
}
