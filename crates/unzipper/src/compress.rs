//! In-place lossy recompression of extracted images.

use crate::error::ExtractError;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, ImageReader};
use std::fs;
use std::path::Path;

/// Re-opens `path` as an image and overwrites it with an optimized encoding.
///
/// JPEG is re-encoded at `quality`, PNG with the best compression level, and
/// any other decodable format is re-saved in its own format.
pub fn recompress_image(path: &Path, quality: u8) -> Result<(), ExtractError> {
    let not_an_image = |source| ExtractError::NotAnImage {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format();
    let image = reader.decode().map_err(not_an_image)?;

    let encoded = match format {
        Some(ImageFormat::Jpeg) => encode_jpeg(&image, quality),
        Some(ImageFormat::Png) => encode_png(&image),
        Some(other) => {
            return image
                .save_with_format(path, other)
                .map_err(|e| ExtractError::Io(std::io::Error::other(e)));
        }
        // decode() succeeded, so the format is known
        None => return Ok(()),
    }
    .map_err(|e| ExtractError::Io(std::io::Error::other(e)))?;

    fs::write(path, encoded)?;
    tracing::debug!(path = %path.display(), quality, "Recompressed image");
    Ok(())
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> image::ImageResult<Vec<u8>> {
    // JPEG has no alpha channel
    let rgb = image.to_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality).write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(out)
}

fn encode_png(image: &DynamicImage) -> image::ImageResult<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new_with_quality(&mut out, CompressionType::Best, FilterType::Adaptive)
        .write_image(
            image.as_bytes(),
            image.width(),
            image.height(),
            image.color().into(),
        )?;
    Ok(out)
}
