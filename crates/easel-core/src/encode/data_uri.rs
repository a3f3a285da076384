//! Output images as self-contained `data:` URIs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// MIME type of every rendered edit.
pub const JPEG_MIME: &str = "image/jpeg";

/// Format encoded bytes as a base64 `data:` URI.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// An encoded image that can be shown directly as an `<img>` source.
///
/// This is what a gallery slot holds. It is immutable once created; editing
/// a slot produces a new `OutputImage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputImage {
    /// Width of the encoded image in pixels.
    pub width: u32,
    /// Height of the encoded image in pixels.
    pub height: u32,
    /// `data:<mime>;base64,...` form of the encoded bytes.
    pub data_uri: String,
}

impl OutputImage {
    /// Wrap encoded JPEG bytes.
    pub fn from_jpeg(width: u32, height: u32, bytes: &[u8]) -> Self {
        Self {
            width,
            height,
            data_uri: to_data_uri(JPEG_MIME, bytes),
        }
    }

    /// Borrow the data URI.
    pub fn as_data_uri(&self) -> &str {
        &self.data_uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::parse_data_uri;

    #[test]
    fn test_to_data_uri() {
        assert_eq!(to_data_uri("image/png", &[0, 1, 2]), "data:image/png;base64,AAEC");
    }

    #[test]
    fn test_output_image_parses_back() {
        let out = OutputImage::from_jpeg(3, 2, &[0xFF, 0xD8, 0xFF, 0xD9]);
        assert!(out.as_data_uri().starts_with("data:image/jpeg;base64,"));

        let parsed = parse_data_uri(out.as_data_uri()).unwrap();
        assert_eq!(parsed.mime.as_deref(), Some(JPEG_MIME));
        assert_eq!(parsed.bytes, vec![0xFF, 0xD8, 0xFF, 0xD9]);
    }
}
