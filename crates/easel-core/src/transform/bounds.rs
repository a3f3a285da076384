//! Bounding box of a rotated rectangle.
//!
//! When a crop region is rotated, its corners extend beyond the original
//! bounds. The output surface must be the axis-aligned box that holds the
//! rotated region without clipping:
//!
//! ```text
//! new_w = |w * cos θ| + |h * sin θ|
//! new_h = |w * sin θ| + |h * cos θ|
//! ```

use serde::{Deserialize, Serialize};

use super::geometry::{sin_cos_degrees, snap};

/// Width and height of a bounding box, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
}

/// Compute the bounding box of a `width` x `height` rectangle rotated about
/// its centre by `rotation_degrees`.
///
/// The angle is normalized modulo 360 first, so `θ` and `θ + 360` give the
/// same result. Quarter turns are exact: 0/180 keep the size and 90/270 swap
/// it.
pub fn bounding_box(width: f64, height: f64, rotation_degrees: f64) -> BoundingBox {
    let (sin, cos) = sin_cos_degrees(rotation_degrees);
    BoundingBox {
        width: (cos * width).abs() + (sin * height).abs(),
        height: (sin * width).abs() + (cos * height).abs(),
    }
}

/// Whole-pixel size of the surface that holds `bbox`.
///
/// Each side is rounded up, except that sides within a millionth of a pixel
/// of a whole number snap onto it. Sides are at least 1 pixel and saturate
/// at `u32::MAX`.
pub fn canvas_size(bbox: BoundingBox) -> (u32, u32) {
    (to_pixels(bbox.width), to_pixels(bbox.height))
}

fn to_pixels(side: f64) -> u32 {
    if !side.is_finite() {
        return u32::MAX;
    }
    let px = snap(side).ceil();
    if px >= u32::MAX as f64 {
        u32::MAX
    } else {
        (px as u32).max(1)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn side() -> impl Strategy<Value = f64> {
        0.5f64..5000.0
    }

    proptest! {
        /// Adding a full turn never changes the box.
        #[test]
        fn prop_full_turn_periodic(w in side(), h in side(), angle in -1000.0f64..1000.0) {
            let a = bounding_box(w, h, angle);
            let b = bounding_box(w, h, angle + 360.0);
            prop_assert!((a.width - b.width).abs() < 1e-6);
            prop_assert!((a.height - b.height).abs() < 1e-6);
        }

        /// Quarter turns are exact swaps, half turns are exact identities.
        #[test]
        fn prop_quarter_turns(w in side(), h in side(), turns in -8i32..8) {
            let b = bounding_box(w, h, turns as f64 * 90.0);
            if turns.rem_euclid(2) == 0 {
                prop_assert_eq!((b.width, b.height), (w, h));
            } else {
                prop_assert_eq!((b.width, b.height), (h, w));
            }
        }

        /// The box always contains the unrotated rectangle's shorter side and
        /// never exceeds the sum of both sides.
        #[test]
        fn prop_box_is_bounded(w in side(), h in side(), angle in 0.0f64..360.0) {
            let b = bounding_box(w, h, angle);
            prop_assert!(b.width >= w.min(h) - 1e-9);
            prop_assert!(b.height >= w.min(h) - 1e-9);
            prop_assert!(b.width <= w + h + 1e-9);
            prop_assert!(b.height <= w + h + 1e-9);
        }

        /// Finite input gives a finite, non-negative box.
        #[test]
        fn prop_box_finite_non_negative(w in side(), h in side(), angle in -1e6f64..1e6) {
            let b = bounding_box(w, h, angle);
            prop_assert!(b.width.is_finite() && b.width >= 0.0);
            prop_assert!(b.height.is_finite() && b.height >= 0.0);
        }
    }
}
