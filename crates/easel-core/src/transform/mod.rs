//! Crop, rotate and flip: the transform calculator and the rasterizer.
//!
//! # Transform Order
//!
//! A render applies, in crop-local space:
//! 1. Crop (the selection widget's rectangle, copied 1:1)
//! 2. Flip (horizontal and/or vertical mirror about the crop centre)
//! 3. Rotation about the centre, onto a surface sized to the rotated bounds
//!
//! # Coordinate System
//!
//! - Crop rectangles are in source pixels, origin at the top-left corner
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Angles are normalized modulo 360 before use

mod affine;
mod bounds;
mod geometry;
mod rasterize;

pub use affine::Affine;
pub use bounds::{bounding_box, canvas_size, BoundingBox};
pub use geometry::{normalize_degrees, FlipState, Rectangle};
pub use rasterize::{
    crop_transform, rasterize, render, render_data_uri, InterpolationFilter, RenderError,
    RenderOptions, MAX_SURFACE_PIXELS,
};
