use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageError, ImageOutputFormat, Rgb, RgbImage};
use thiserror::Error;

/// Size of the placeholder image used when no screenshot could be captured.
pub const FALLBACK_WIDTH: u32 = 800;
pub const FALLBACK_HEIGHT: u32 = 600;

const FALLBACK_GRAY: Rgb<u8> = Rgb([128, 128, 128]);

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Failed to load image: {0}")]
    Load(#[from] ImageError),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Failed to encode image: {0}")]
    Encode(String),
}

pub fn load_image(path: &Path) -> Result<DynamicImage, ImageLoadError> {
    if !path.exists() {
        return Err(ImageLoadError::NotFound(path.display().to_string()));
    }
    Ok(image::open(path)?)
}

pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ImageLoadError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Blank gray canvas standing in for a screenshot that could not be fetched.
pub fn fallback_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, FALLBACK_GRAY))
}

/// Encode as PNG in memory, e.g. to pipe into an external OCR process.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, ImageLoadError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageOutputFormat::Png)
        .map_err(|e| ImageLoadError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_image(Path::new("/nonexistent/path/image.png"));
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ImageLoadError::NotFound(_)));
    }

    #[test]
    fn load_image_reads_saved_png() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("shot.png");
        RgbaImage::from_pixel(10, 5, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .expect("write image");

        let img = load_image(&path).expect("load image");
        assert_eq!(img.dimensions(), (10, 5));
    }

    #[test]
    fn fallback_image_is_uniform_gray() {
        let img = fallback_image(FALLBACK_WIDTH, FALLBACK_HEIGHT);
        assert_eq!(img.dimensions(), (800, 600));
        let rgb = img.to_rgb8();
        assert!(rgb.pixels().all(|p| *p == FALLBACK_GRAY));
    }

    #[test]
    fn encode_then_decode_keeps_dimensions() {
        let img = fallback_image(4, 3);
        let bytes = encode_png(&img).expect("encode");
        assert_eq!(&bytes[1..4], b"PNG");
        let decoded = decode_image(&bytes).expect("decode");
        assert_eq!(decoded.dimensions(), (4, 3));
    }

    #[test]
    fn decode_rejects_garbage() {
        let result = decode_image(b"<html>not an image</html>");
        assert!(matches!(result, Err(ImageLoadError::Load(_))));
    }
}
