//! In-memory JPEG encoding of captured frames.
//!
//! Takes pixel data in, returns JPEG bytes out.

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

/// Encodes a screenshot as JPEG.
///
/// The alpha channel is dropped first (JPEG has none). `quality` is clamped
/// to the encoder's 1..=100 range.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(EncodeError::ZeroDimension);
    }

    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut jpeg_bytes: Vec<u8> = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg_bytes, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(jpeg_bytes)
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Captured image has zero width or height")]
    ZeroDimension,

    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}
