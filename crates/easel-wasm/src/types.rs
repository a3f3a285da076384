//! WASM-compatible wrapper types for image data and errors.
//!
//! This module provides JavaScript-friendly types that wrap the core Easel
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use std::fmt::Display;

use easel_core::decode::DecodedImage;
use easel_core::transform::BoundingBox;
use wasm_bindgen::prelude::*;

/// A decoded image wrapper for JavaScript.
///
/// The pixel data stays in WASM memory. `pixels()` copies it out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and RGB pixel data
    /// (3 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core DecodedImage. Clones the pixel data.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Bounding box of a rotated rectangle.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsBoundingBox {
    width: f64,
    height: f64,
}

#[wasm_bindgen]
impl JsBoundingBox {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.height
    }
}

impl From<BoundingBox> for JsBoundingBox {
    fn from(bbox: BoundingBox) -> Self {
        Self {
            width: bbox.width,
            height: bbox.height,
        }
    }
}

/// Report an error to the browser console and turn it into a `JsValue`.
pub(crate) fn js_error(err: impl Display) -> JsValue {
    let message = err.to_string();
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}
