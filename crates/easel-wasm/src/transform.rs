//! WASM bindings for the crop/rotate/flip rasterizer.
//!
//! The crop rectangle comes straight from the selection widget's
//! `croppedAreaPixels` object and is passed through `serde-wasm-bindgen`.

use crate::types::{js_error, JsBoundingBox, JsDecodedImage};
use easel_core::transform::{self, FlipState, Rectangle, RenderError, RenderOptions};
use wasm_bindgen::prelude::*;

/// Bounding box of a `width` x `height` rectangle rotated by
/// `rotation_degrees` about its centre.
#[wasm_bindgen]
pub fn bounding_box(width: f64, height: f64, rotation_degrees: f64) -> JsBoundingBox {
    transform::bounding_box(width, height, rotation_degrees).into()
}

/// Crop, rotate and flip a decoded image, returning the raw raster.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const out = rasterize(image, { x: 50, y: 50, width: 200, height: 150 }, 90, false, false);
/// console.log(`${out.width}x${out.height}`); // 150x200
/// ```
#[wasm_bindgen]
pub fn rasterize(
    image: &JsDecodedImage,
    crop: JsValue,
    rotation_degrees: f64,
    flip_horizontal: bool,
    flip_vertical: bool,
) -> Result<JsDecodedImage, JsValue> {
    let crop: Rectangle = serde_wasm_bindgen::from_value(crop).map_err(js_error)?;
    rasterize_image(
        image,
        &crop,
        rotation_degrees,
        FlipState::new(flip_horizontal, flip_vertical),
        &RenderOptions::default(),
    )
    .map_err(js_error)
}

/// Decode `source_uri`, apply crop/rotation/flip and return the result as a
/// `data:image/jpeg;base64,...` string.
///
/// `options` may be `undefined` or a partial `{ quality, filter, background }`
/// object; missing fields use the defaults.
#[wasm_bindgen]
pub fn render_data_uri(
    source_uri: &str,
    crop: JsValue,
    rotation_degrees: f64,
    flip_horizontal: bool,
    flip_vertical: bool,
    options: JsValue,
) -> Result<String, JsValue> {
    let crop: Rectangle = serde_wasm_bindgen::from_value(crop).map_err(js_error)?;
    let options: RenderOptions = if options.is_undefined() || options.is_null() {
        RenderOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(js_error)?
    };

    transform::render_data_uri(
        source_uri,
        &crop,
        rotation_degrees,
        FlipState::new(flip_horizontal, flip_vertical),
        &options,
    )
    .map(|out| out.data_uri)
    .map_err(js_error)
}

fn rasterize_image(
    image: &JsDecodedImage,
    crop: &Rectangle,
    rotation_degrees: f64,
    flip: FlipState,
    options: &RenderOptions,
) -> Result<JsDecodedImage, RenderError> {
    transform::rasterize(&image.to_decoded(), crop, rotation_degrees, flip, options)
        .map(JsDecodedImage::from_decoded)
}
