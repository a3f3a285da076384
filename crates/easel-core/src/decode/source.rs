//! Decoding of uploaded image bytes into a drawable raster.
//!
//! Any format the `image` crate is built with (JPEG, PNG, GIF, WebP, BMP) is
//! accepted. EXIF orientation is applied so the raster matches what the
//! browser shows in the gallery, and transparency is flattened onto black,
//! which is what a canvas with transparent pixels turns into once exported
//! as JPEG.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};
use tracing::debug;

use super::data_uri::parse_data_uri;
use super::{DecodeError, DecodedImage, Orientation};

/// Decode image bytes, applying EXIF orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized.
/// Returns `DecodeError::CorruptedFile` if the bytes are damaged or truncated.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    let format = reader.format();

    let img = reader.decode().map_err(map_image_error)?;
    let img = apply_orientation(img, orientation);

    debug!(
        ?format,
        ?orientation,
        width = img.width(),
        height = img.height(),
        "decoded source image"
    );

    Ok(flatten_alpha(img))
}

/// Decode a `data:image/...;base64,` URI as produced by the file picker.
pub fn decode_data_uri(uri: &str) -> Result<DecodedImage, DecodeError> {
    let data = parse_data_uri(uri)?;
    decode_image(&data.bytes)
}

/// Extract the EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` when there is no EXIF block or no
/// orientation tag.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// Composite any alpha channel onto black and drop it.
fn flatten_alpha(img: DynamicImage) -> DecodedImage {
    if !img.color().has_alpha() {
        return DecodedImage::from_rgb_image(img.into_rgb8());
    }

    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut pixels = Vec::with_capacity((width as usize) * (height as usize) * 3);
    for px in rgba.pixels() {
        let [r, g, b, a] = px.0;
        let a = a as u32;
        pixels.push(((r as u32 * a + 127) / 255) as u8);
        pixels.push(((g as u32 * a + 127) / 255) as u8);
        pixels.push(((b as u32 * a + 127) / 255) as u8);
    }
    DecodedImage::new(width, height, pixels)
}
