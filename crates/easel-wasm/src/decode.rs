//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_data_uri`] - Decode the `data:` URI produced by `FileReader`
//! - [`decode_image`] - Decode raw image bytes
//!
//! # Example
//!
//! ```typescript
//! import { decode_data_uri } from '@easel/wasm';
//!
//! reader.onloadend = () => {
//!   const image = decode_data_uri(reader.result as string);
//!   console.log(`Decoded ${image.width}x${image.height}`);
//! };
//! ```

use crate::types::{js_error, JsDecodedImage};
use easel_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a `data:image/...;base64,` URI to RGB pixels.
///
/// EXIF orientation is applied and transparency is flattened onto black.
#[wasm_bindgen]
pub fn decode_data_uri(uri: &str) -> Result<JsDecodedImage, JsValue> {
    decode::decode_data_uri(uri)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Decode raw image bytes (JPEG, PNG, GIF, WebP, BMP).
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}
