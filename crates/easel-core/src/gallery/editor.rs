//! Working state of the overlay editor.
//!
//! An [`Editor`] exists only while the overlay is open. It is built once per
//! opening with the action the user picked from the slot menu; that action is
//! applied a single time, in [`Editor::open`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::decode::DecodedImage;
use crate::encode::OutputImage;
use crate::transform::{normalize_degrees, render, FlipState, Rectangle, RenderError, RenderOptions};

/// The adjustment a slot-menu entry opens the editor with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditAction {
    #[default]
    #[serde(rename = "crop")]
    Crop,
    #[serde(rename = "rotate")]
    Rotate,
    #[serde(rename = "flipH")]
    FlipHorizontal,
    #[serde(rename = "flipV")]
    FlipVertical,
}

/// Aspect-ratio presets offered for the crop frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectRatio {
    /// 1:1
    Square,
    /// 16:9
    #[default]
    Landscape,
    /// 4:3
    Standard,
    /// 3:4
    Portrait,
    /// 2:3
    PortraitTall,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Standard,
        AspectRatio::Portrait,
        AspectRatio::PortraitTall,
    ];

    /// Width divided by height.
    pub fn ratio(self) -> f64 {
        match self {
            AspectRatio::Square => 1.0,
            AspectRatio::Landscape => 16.0 / 9.0,
            AspectRatio::Standard => 4.0 / 3.0,
            AspectRatio::Portrait => 3.0 / 4.0,
            AspectRatio::PortraitTall => 2.0 / 3.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Square => "Square (1:1)",
            AspectRatio::Landscape => "Landscape (16:9)",
            AspectRatio::Standard => "Standard (4:3)",
            AspectRatio::Portrait => "Portrait (3:4)",
            AspectRatio::PortraitTall => "Portrait (2:3)",
        }
    }
}

/// Zoom bounds of the crop widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorLimits {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
}

impl Default for EditorLimits {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 3.0,
            zoom_step: 0.1,
        }
    }
}

impl EditorLimits {
    /// Check the bounds are usable: finite, positive, and `min <= max`.
    pub fn validate(self) -> Result<Self, EditorError> {
        let ok = self.min_zoom.is_finite()
            && self.max_zoom.is_finite()
            && self.zoom_step.is_finite()
            && self.min_zoom > 0.0
            && self.min_zoom <= self.max_zoom
            && self.zoom_step > 0.0;
        if ok {
            Ok(self)
        } else {
            Err(EditorError::InvalidLimits(self))
        }
    }
}

#[derive(Debug, Error)]
pub enum EditorError {
    /// Save was requested before the widget reported a crop.
    #[error("No crop area selected")]
    NoCropSelected,

    #[error("Invalid zoom limits: {0:?}")]
    InvalidLimits(EditorLimits),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// The open editor: a source image plus the transform being built up.
#[derive(Debug, Clone)]
pub struct Editor {
    source: DecodedImage,
    rotation: f64,
    flip: FlipState,
    zoom: f64,
    aspect: AspectRatio,
    crop: Option<Rectangle>,
    limits: EditorLimits,
}

impl Editor {
    /// Open the editor on `source`, applying `default_adjustment` once.
    pub fn open(source: DecodedImage, default_adjustment: EditAction) -> Self {
        Self::with_limits(source, default_adjustment, EditorLimits::default())
    }

    pub fn with_limits(
        source: DecodedImage,
        default_adjustment: EditAction,
        limits: EditorLimits,
    ) -> Self {
        let mut editor = Self {
            source,
            rotation: 0.0,
            flip: FlipState::default(),
            zoom: limits.min_zoom,
            aspect: AspectRatio::default(),
            crop: None,
            limits,
        };
        editor.apply(default_adjustment);
        debug!(
            action = ?default_adjustment,
            width = editor.source.width,
            height = editor.source.height,
            "editor opened"
        );
        editor
    }

    /// Apply one toolbar action to the working transform.
    pub fn apply(&mut self, action: EditAction) {
        match action {
            EditAction::Crop => {}
            EditAction::Rotate => self.rotate_clockwise(),
            EditAction::FlipHorizontal => self.toggle_flip_horizontal(),
            EditAction::FlipVertical => self.toggle_flip_vertical(),
        }
    }

    /// Rotate a further 90 degrees clockwise.
    pub fn rotate_clockwise(&mut self) {
        self.rotation = normalize_degrees(self.rotation + 90.0);
    }

    pub fn toggle_flip_horizontal(&mut self) {
        self.flip.horizontal = !self.flip.horizontal;
    }

    pub fn toggle_flip_vertical(&mut self) {
        self.flip.vertical = !self.flip.vertical;
    }

    /// Set the widget zoom, clamped to the configured bounds. Non-finite
    /// values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            // f64::clamp panics on inverted or NaN bounds
            self.zoom = zoom.max(self.limits.min_zoom).min(self.limits.max_zoom);
        }
    }

    pub fn set_aspect(&mut self, aspect: AspectRatio) {
        self.aspect = aspect;
    }

    /// Record the crop the selection widget reported, in source pixels.
    pub fn set_crop(&mut self, crop: Rectangle) {
        self.crop = Some(crop);
    }

    pub fn source(&self) -> &DecodedImage {
        &self.source
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn flip(&self) -> FlipState {
        self.flip
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn aspect(&self) -> AspectRatio {
        self.aspect
    }

    pub fn crop(&self) -> Option<Rectangle> {
        self.crop
    }

    /// Render the current crop and transform.
    pub fn save(&self, options: &RenderOptions) -> Result<OutputImage, EditorError> {
        let crop = self.crop.ok_or(EditorError::NoCropSelected)?;
        Ok(render(&self.source, &crop, self.rotation, self.flip, options)?)
    }
}
