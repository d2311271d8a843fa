//! Loading the background map and exporting the flattened result
//!
//! Decode goes through the `image` crate, encode through the `png` crate.
//! Saving writes to a temporary file next to the target and persists it
//! afterwards, so a failed save never leaves a partial file.

use std::io;
use std::path::Path;

use image::RgbaImage;

use crate::error::{Error, Result};

/// Decode a map image into an RGBA buffer.
///
/// On failure the caller's previous background and markers stay untouched;
/// this function only reads.
pub fn load_map(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)
        .map_err(|source| Error::Decode {
            path: path.to_owned(),
            source,
        })?
        .to_rgba8();
    log::debug!(
        "decoded map image {}: {}x{} pixels",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(img)
}

/// Encode the image as PNG into `path`, atomically.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut file = tempfile::Builder::new()
        .prefix(".mapmarker-")
        .suffix(".png")
        .tempfile_in(dir.unwrap_or_else(|| Path::new(".")))?;
    write_png(&mut file, image)?;
    file.persist(path).map_err(|err| Error::Write(err.error))?;
    log::info!("saved flattened map to {}", path.display());
    Ok(())
}

/// Encode the image as PNG into an in-memory buffer.
pub fn save_to_buffer(image: &RgbaImage, buffer: &mut Vec<u8>) -> Result<()> {
    write_png(buffer, image)?;
    Ok(())
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> std::result::Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        let img = RgbaImage::from_pixel(20, 10, Rgba([10, 20, 30, 255]));
        save_png(&img, &path).unwrap();
        let back = load_map(&path).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_load_unreadable_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.png");
        std::fs::write(&path, b"not a png at all").unwrap();
        let err = load_map(&path).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_buffer_export_is_png() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let mut buffer = Vec::new();
        save_to_buffer(&img, &mut buffer).unwrap();
        assert_eq!(&buffer[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_failed_save_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-subdir").join("map.png");
        let img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        assert!(save_png(&img, &missing).is_err());
        assert!(!missing.exists());
    }
}
