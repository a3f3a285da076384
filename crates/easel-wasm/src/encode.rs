//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode a JsDecodedImage to JPEG bytes
//! - [`encode_jpeg_data_uri`] - Encode a JsDecodedImage to a `data:image/jpeg` URI

use crate::types::{js_error, JsDecodedImage};
use easel_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image to JPEG bytes. `quality` is 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_image(&image.to_decoded(), quality).map_err(js_error)
}

/// Encode an image to a `data:image/jpeg;base64,...` string, ready to use as
/// an `<img>` source.
#[wasm_bindgen]
pub fn encode_jpeg_data_uri(image: &JsDecodedImage, quality: u8) -> Result<String, JsValue> {
    encode_data_uri(image, quality).map_err(js_error)
}

/// The JPEG quality browsers use for `toDataURL("image/jpeg")`.
#[wasm_bindgen]
pub fn default_jpeg_quality() -> u8 {
    encode::DEFAULT_JPEG_QUALITY
}

fn encode_data_uri(image: &JsDecodedImage, quality: u8) -> Result<String, encode::EncodeError> {
    let bytes = encode::encode_image(&image.to_decoded(), quality)?;
    Ok(encode::to_data_uri(encode::JPEG_MIME, &bytes))
}
