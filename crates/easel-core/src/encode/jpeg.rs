//! JPEG encoding of rendered edits.
//!
//! Every saved edit is re-encoded as JPEG, whatever the upload format was.
//! Repeated edits of the same slot therefore compound compression loss.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;
use tracing::debug;

use crate::decode::DecodedImage;

/// Quality used when the caller does not pick one.
///
/// Matches the quality browsers use for `canvas.toDataURL("image/jpeg")`.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = buffer.into_inner();
    debug!(width, height, quality, len = bytes.len(), "encoded jpeg");
    Ok(bytes)
}

/// Encode a decoded image to JPEG bytes.
pub fn encode_image(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    encode_jpeg(&image.pixels, image.width, image.height, quality)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Valid input always yields a complete JPEG stream.
        #[test]
        fn prop_valid_input_produces_jpeg(
            width in 1u32..=40,
            height in 1u32..=40,
            quality in 1u8..=100,
            value in any::<u8>(),
        ) {
            let pixels = vec![value; (width * height * 3) as usize];
            let bytes = encode_jpeg(&pixels, width, height, quality).unwrap();
            prop_assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Wrong buffer lengths are always rejected.
        #[test]
        fn prop_wrong_length_rejected(
            width in 1u32..=40,
            height in 1u32..=40,
            delta in 1usize..=10,
        ) {
            let pixels = vec![0u8; (width * height * 3) as usize + delta];
            let is_invalid = matches!(
                encode_jpeg(&pixels, width, height, 90),
                Err(EncodeError::InvalidPixelData { .. })
            );
            prop_assert!(is_invalid);
        }
    }
}
