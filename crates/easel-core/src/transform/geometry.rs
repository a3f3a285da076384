//! Geometric value types shared by the transform calculator and rasterizer.

use serde::{Deserialize, Serialize};

/// Values this close to a whole number are treated as that number.
pub(crate) const SNAP_EPSILON: f64 = 1e-6;

/// A crop rectangle in source-pixel coordinates.
///
/// Produced by the crop-selection widget (its `croppedAreaPixels`), already
/// accounting for any pan and zoom the user did in the widget.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole `width` x `height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }

    /// True when all fields are finite and the size is strictly positive.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Independent horizontal and vertical mirror toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlipState {
    pub horizontal: bool,
    pub vertical: bool,
}

impl FlipState {
    pub fn new(horizontal: bool, vertical: bool) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Scale factors for the horizontal and vertical axes.
    pub fn scale(&self) -> (f64, f64) {
        (
            if self.horizontal { -1.0 } else { 1.0 },
            if self.vertical { -1.0 } else { 1.0 },
        )
    }

    pub fn is_identity(&self) -> bool {
        !self.horizontal && !self.vertical
    }
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// `(sin, cos)` of an angle in degrees.
///
/// Quarter turns return exact values so 90/180/270 degree renders land on
/// pixel centres without floating-point drift.
pub(crate) fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    let normalized = normalize_degrees(degrees);
    let quarter = normalized / 90.0;
    if (quarter - quarter.round()).abs() < SNAP_EPSILON / 90.0 {
        return match quarter.round() as i64 % 4 {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    normalized.to_radians().sin_cos()
}

/// Snap `value` onto the nearest whole number if it is within
/// [`SNAP_EPSILON`] of it.
#[inline]
pub(crate) fn snap(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < SNAP_EPSILON {
        rounded
    } else {
        value
    }
}
