//! WASM binding for the gallery controller.
//!
//! `JsGallery` owns the slots, the menu/editor state and the open editor.
//! The front end forwards clicks and file-picker results to it and re-reads
//! `images()` after every save.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const gallery = new JsGallery({ render: { quality: 92 } });
//! const target = gallery.request_add();
//! input.onchange = () => {
//!   const reader = new FileReader();
//!   reader.onloadend = () => gallery.file_picked(target, reader.result as string);
//!   reader.readAsDataURL(input.files[0]);
//! };
//! ```

use crate::types::js_error;
use easel_core::gallery::{
    AspectRatio, EditAction, EditorLimits, GalleryController, GalleryError, PickTarget,
    SaveOutcome,
};
use easel_core::transform::{Rectangle, RenderOptions};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Construction options. Every field is optional.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct GalleryConfig {
    render: RenderOptions,
    limits: EditorLimits,
}

/// The slot a pending file pick is destined for.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsPickTarget {
    inner: PickTarget,
}

#[wasm_bindgen]
impl JsPickTarget {
    #[wasm_bindgen(getter)]
    pub fn is_replace(&self) -> bool {
        matches!(self.inner, PickTarget::Replace(_))
    }

    /// The slot being replaced, or `undefined` when appending.
    #[wasm_bindgen(getter)]
    pub fn slot(&self) -> Option<u32> {
        match self.inner {
            PickTarget::Append => None,
            PickTarget::Replace(slot) => Some(slot as u32),
        }
    }
}

impl From<PickTarget> for JsPickTarget {
    fn from(inner: PickTarget) -> Self {
        Self { inner }
    }
}

#[wasm_bindgen]
pub struct JsGallery {
    controller: GalleryController,
}

#[wasm_bindgen]
impl JsGallery {
    /// Create an empty gallery. `config` may be `undefined` or
    /// `{ render?: RenderOptions, limits?: EditorLimits }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsGallery, JsValue> {
        let config: GalleryConfig = if config.is_undefined() || config.is_null() {
            GalleryConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_error)?
        };
        Self::with_config(config).map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.controller.gallery().len()
    }

    pub fn is_empty(&self) -> bool {
        self.controller.gallery().is_empty()
    }

    /// The data URI stored in `index`, if any.
    pub fn image(&self, index: usize) -> Option<String> {
        self.controller
            .gallery()
            .get(index)
            .map(|img| img.data_uri.clone())
    }

    /// All slot data URIs in display order.
    pub fn images(&self) -> js_sys::Array {
        self.controller
            .gallery()
            .iter()
            .map(|img| JsValue::from_str(&img.data_uri))
            .collect()
    }

    #[wasm_bindgen(getter)]
    pub fn open_menu_slot(&self) -> Option<u32> {
        self.controller.state().open_menu_slot.map(|s| s as u32)
    }

    pub fn toggle_menu(&mut self, slot: usize) {
        self.controller.toggle_menu(slot);
    }

    pub fn dismiss_menu(&mut self) {
        self.controller.dismiss_menu();
    }

    pub fn request_add(&mut self) -> JsPickTarget {
        self.controller.request_add().into()
    }

    pub fn request_replace(&mut self, slot: usize) -> Result<JsPickTarget, JsValue> {
        self.controller
            .request_replace(slot)
            .map(JsPickTarget::from)
            .map_err(js_error)
    }

    pub fn pick_cancelled(&mut self) {
        self.controller.pick_cancelled();
    }

    /// Decode the picked file and open the editor on it with a crop.
    pub fn file_picked(&mut self, target: &JsPickTarget, data_uri: &str) -> Result<(), JsValue> {
        self.controller
            .file_picked(target.inner, data_uri)
            .map_err(js_error)
    }

    /// Open the editor on `slot`. `action` is one of `crop`, `rotate`,
    /// `flipH` or `flipV`.
    pub fn choose_action(&mut self, slot: usize, action: &str) -> Result<(), JsValue> {
        let action = parse_action(action)
            .ok_or_else(|| js_error(format!("Unknown edit action: {action}")))?;
        self.controller
            .choose_action(slot, action)
            .map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn is_editor_open(&self) -> bool {
        self.controller.state().is_editor_open()
    }

    /// Rotation of the open editor in degrees, or `undefined`.
    #[wasm_bindgen(getter)]
    pub fn editor_rotation(&self) -> Option<f64> {
        self.controller.editor().map(|e| e.rotation())
    }

    /// Zoom of the open editor, or `undefined`.
    #[wasm_bindgen(getter)]
    pub fn editor_zoom(&self) -> Option<f64> {
        self.controller.editor().map(|e| e.zoom())
    }

    pub fn rotate(&mut self) {
        if let Some(editor) = self.controller.editor_mut() {
            editor.rotate_clockwise();
        }
    }

    pub fn flip_horizontal(&mut self) {
        if let Some(editor) = self.controller.editor_mut() {
            editor.toggle_flip_horizontal();
        }
    }

    pub fn flip_vertical(&mut self) {
        if let Some(editor) = self.controller.editor_mut() {
            editor.toggle_flip_vertical();
        }
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        if let Some(editor) = self.controller.editor_mut() {
            editor.set_zoom(zoom);
        }
    }

    /// Switch the crop frame preset. `aspect` is one of `square`,
    /// `landscape`, `standard`, `portrait` or `portrait_tall`.
    pub fn set_aspect(&mut self, aspect: &str) -> Result<(), JsValue> {
        let aspect = parse_aspect(aspect)
            .ok_or_else(|| js_error(format!("Unknown aspect ratio: {aspect}")))?;
        if let Some(editor) = self.controller.editor_mut() {
            editor.set_aspect(aspect);
        }
        Ok(())
    }

    /// Report the crop area the selection widget settled on, in source
    /// pixels.
    pub fn set_crop(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if let Some(editor) = self.controller.editor_mut() {
            editor.set_crop(Rectangle::new(x, y, width, height));
        }
    }

    /// Render and store the edit. Returns `false` when no crop has been
    /// reported yet, in which case the editor stays open.
    pub fn save(&mut self) -> Result<bool, JsValue> {
        match self.controller.save().map_err(js_error)? {
            SaveOutcome::Saved { .. } => Ok(true),
            SaveOutcome::NoCrop => Ok(false),
        }
    }

    pub fn cancel(&mut self) {
        self.controller.cancel();
    }
}

impl JsGallery {
    fn with_config(config: GalleryConfig) -> Result<Self, GalleryError> {
        Ok(Self {
            controller: GalleryController::new(config.render, config.limits)?,
        })
    }
}

fn parse_action(name: &str) -> Option<EditAction> {
    match name {
        "crop" => Some(EditAction::Crop),
        "rotate" => Some(EditAction::Rotate),
        "flipH" => Some(EditAction::FlipHorizontal),
        "flipV" => Some(EditAction::FlipVertical),
        _ => None,
    }
}

fn parse_aspect(name: &str) -> Option<AspectRatio> {
    AspectRatio::ALL.into_iter().find(|aspect| {
        let key = match aspect {
            AspectRatio::Square => "square",
            AspectRatio::Landscape => "landscape",
            AspectRatio::Standard => "standard",
            AspectRatio::Portrait => "portrait",
            AspectRatio::PortraitTall => "portrait_tall",
        };
        key == name
    })
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_new_without_config() {
        let gallery = JsGallery::new(JsValue::UNDEFINED).unwrap();
        assert_eq!(gallery.len(), 0);
        assert_eq!(gallery.images().length(), 0);
    }

    #[wasm_bindgen_test]
    fn test_new_rejects_bad_config() {
        assert!(JsGallery::new(JsValue::from_str("nope")).is_err());
    }

    #[wasm_bindgen_test]
    fn test_new_rejects_inverted_limits() {
        let config = js_sys::JSON::parse(r#"{"limits":{"min_zoom":3,"max_zoom":1}}"#).unwrap();
        assert!(JsGallery::new(config).is_err());
    }

    #[wasm_bindgen_test]
    fn test_replace_out_of_range() {
        let mut gallery = JsGallery::new(JsValue::NULL).unwrap();
        assert!(gallery.request_replace(0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_unknown_action() {
        let mut gallery = JsGallery::new(JsValue::NULL).unwrap();
        assert!(gallery.choose_action(0, "sharpen").is_err());
    }

    #[wasm_bindgen_test]
    fn test_file_picked_garbage() {
        let mut gallery = JsGallery::new(JsValue::NULL).unwrap();
        let target = gallery.request_add();
        assert!(gallery.file_picked(&target, "data:image/png;base64,AAAA").is_err());
        assert!(!gallery.is_editor_open());
    }
}
