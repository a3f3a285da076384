//! Easel WASM - WebAssembly bindings for the Easel gallery editor
//!
//! This crate exposes easel-core to the browser front end.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - `data:` URI and raw byte decoding
//! - `encode` - JPEG encoding to bytes or `data:` URIs
//! - `transform` - bounding box and crop/rotate/flip rendering
//! - `gallery` - the gallery controller (`JsGallery`)
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsGallery, bounding_box } from '@easel/wasm';
//!
//! await init();
//!
//! const gallery = new JsGallery();
//! const bbox = bounding_box(200, 150, 90);
//! console.log(`${bbox.width}x${bbox.height}`); // 150x200
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod gallery;
mod transform;
mod types;

pub use decode::{decode_data_uri, decode_image};
pub use encode::{default_jpeg_quality, encode_jpeg, encode_jpeg_data_uri};
pub use gallery::{JsGallery, JsPickTarget};
pub use transform::{bounding_box, rasterize, render_data_uri};
pub use types::{JsBoundingBox, JsDecodedImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}


/// WASM-specific tests that require a browser panic hook.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_init_is_repeatable() {
        init();
        init();
        assert!(!version().is_empty());
    }
}
