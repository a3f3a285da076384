//! Crop, rotate and flip a source image into a new flattened raster.
//!
//! # Algorithm
//!
//! The output surface is the bounding box of the rotated crop. The forward
//! transform from crop-local space to the surface is
//!
//! ```text
//! M = T(out_w / 2, out_h / 2) · R(θ) · S(±1, ±1) · T(-crop_w / 2, -crop_h / 2)
//! ```
//!
//! Painting uses inverse mapping: every output pixel centre is mapped back
//! through `M⁻¹` into crop-local space. Points outside the crop, and crop
//! points that fall outside the source image, keep the background colour.
//! The crop is copied at 1:1 scale; zoom done in the selection widget is
//! already baked into the crop coordinates.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::affine::Affine;
use super::bounds::{bounding_box, canvas_size};
use super::geometry::{normalize_degrees, snap, FlipState, Rectangle};
use crate::decode::{decode_data_uri, DecodeError, DecodedImage};
use crate::encode::{encode_image, EncodeError, OutputImage, DEFAULT_JPEG_QUALITY};

/// Largest surface the rasterizer will allocate, in pixels.
///
/// Same area limit browsers put on a 2D canvas (16384 x 16384).
pub const MAX_SURFACE_PIXELS: u64 = 16_384 * 16_384;

/// Interpolation filter used when sampling the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest source pixel.
    Nearest,
    /// Weighted average of the four nearest pixels, like canvas image
    /// smoothing.
    #[default]
    Bilinear,
}

/// Options for a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// JPEG quality, 1-100.
    pub quality: u8,
    pub filter: InterpolationFilter,
    /// Colour of surface pixels not covered by the crop.
    pub background: [u8; 3],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
            filter: InterpolationFilter::Bilinear,
            background: [0, 0, 0],
        }
    }
}

/// Errors from a render.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid crop rectangle: {0:?}")]
    InvalidCrop(Rectangle),

    #[error("Invalid source pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    #[error("Cannot allocate a {width}x{height} drawing surface")]
    Surface { width: u32, height: u32 },

    #[error("Failed to decode source: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to encode output: {0}")]
    Encode(#[from] EncodeError),
}

/// Forward transform from crop-local coordinates to the output surface.
pub fn crop_transform(
    crop: &Rectangle,
    rotation_degrees: f64,
    flip: FlipState,
    surface: (u32, u32),
) -> Affine {
    let (sx, sy) = flip.scale();
    Affine::IDENTITY
        .translate(surface.0 as f64 / 2.0, surface.1 as f64 / 2.0)
        .rotate(rotation_degrees)
        .scale(sx, sy)
        .translate(-crop.width / 2.0, -crop.height / 2.0)
}

/// Paint the transformed crop of `source` onto a new surface.
///
/// The crop is not clamped to the source: parts of it outside the image
/// come out as the background colour.
pub fn rasterize(
    source: &DecodedImage,
    crop: &Rectangle,
    rotation_degrees: f64,
    flip: FlipState,
    options: &RenderOptions,
) -> Result<DecodedImage, RenderError> {
    if !crop.is_valid() || !rotation_degrees.is_finite() {
        return Err(RenderError::InvalidCrop(*crop));
    }
    let expected = source.pixel_count() * 3;
    if source.pixels.len() != expected {
        return Err(RenderError::InvalidPixelData {
            expected,
            actual: source.pixels.len(),
        });
    }

    let rotation = normalize_degrees(rotation_degrees);
    let bbox = bounding_box(crop.width, crop.height, rotation);
    let (width, height) = canvas_size(bbox);
    if width as u64 * height as u64 > MAX_SURFACE_PIXELS {
        return Err(RenderError::Surface { width, height });
    }

    let inverse = crop_transform(crop, rotation, flip, (width, height))
        .invert()
        .ok_or(RenderError::Surface { width, height })?;

    let sampler = Sampler::new(source, crop, options);
    let mut output = DecodedImage::filled(width, height, options.background);

    for dy in 0..height {
        for dx in 0..width {
            let (u, v) = inverse.apply(dx as f64 + 0.5, dy as f64 + 0.5);
            let (u, v) = (snap(u * 2.0) / 2.0, snap(v * 2.0) / 2.0);
            if u < 0.0 || v < 0.0 || u >= crop.width || v >= crop.height {
                continue;
            }
            if let Some(rgb) = sampler.sample(crop.x + u - 0.5, crop.y + v - 0.5) {
                let idx = ((dy as usize) * (width as usize) + dx as usize) * 3;
                output.pixels[idx..idx + 3].copy_from_slice(&rgb);
            }
        }
    }

    debug!(
        ?crop,
        rotation,
        flip_h = flip.horizontal,
        flip_v = flip.vertical,
        width,
        height,
        "rasterized crop"
    );

    Ok(output)
}

/// Rasterize and encode the result as a JPEG gallery image.
pub fn render(
    source: &DecodedImage,
    crop: &Rectangle,
    rotation_degrees: f64,
    flip: FlipState,
    options: &RenderOptions,
) -> Result<OutputImage, RenderError> {
    let raster = rasterize(source, crop, rotation_degrees, flip, options)?;
    let jpeg = encode_image(&raster, options.quality)?;
    Ok(OutputImage::from_jpeg(raster.width, raster.height, &jpeg))
}

/// Decode a `data:` URI source, then [`render`] it.
pub fn render_data_uri(
    source_uri: &str,
    crop: &Rectangle,
    rotation_degrees: f64,
    flip: FlipState,
    options: &RenderOptions,
) -> Result<OutputImage, RenderError> {
    let source = decode_data_uri(source_uri)?;
    render(&source, crop, rotation_degrees, flip, options)
}

/// Reads source pixels for one render, limited to the crop's pixel span.
struct Sampler<'a> {
    image: &'a DecodedImage,
    filter: InterpolationFilter,
    // Inclusive pixel range neighbours may be drawn from, so bilinear
    // filtering never bleeds in colour from outside the crop.
    min_x: i64,
    min_y: i64,
    max_x: i64,
    max_y: i64,
}

impl<'a> Sampler<'a> {
    fn new(image: &'a DecodedImage, crop: &Rectangle, options: &RenderOptions) -> Self {
        let min_x = (snap(crop.x).floor() as i64).max(0);
        let min_y = (snap(crop.y).floor() as i64).max(0);
        let max_x = (snap(crop.x + crop.width).ceil() as i64 - 1).min(image.width as i64 - 1);
        let max_y = (snap(crop.y + crop.height).ceil() as i64 - 1).min(image.height as i64 - 1);
        Self {
            image,
            filter: options.filter,
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Sample at source pixel-index coordinates (pixel `i` has its centre
    /// at `i`). `None` when the nearest pixel is outside the image.
    fn sample(&self, x: f64, y: f64) -> Option<[u8; 3]> {
        let nx = (x + 0.5).floor() as i64;
        let ny = (y + 0.5).floor() as i64;
        if nx < 0 || ny < 0 || nx >= self.image.width as i64 || ny >= self.image.height as i64 {
            return None;
        }
        if self.min_x > self.max_x || self.min_y > self.max_y {
            return None;
        }

        match self.filter {
            InterpolationFilter::Nearest => self.fetch(nx, ny),
            InterpolationFilter::Bilinear => Some(self.bilinear(x, y)),
        }
    }

    fn fetch(&self, x: i64, y: i64) -> Option<[u8; 3]> {
        self.image.pixel(x as u32, y as u32)
    }

    fn clamped(&self, x: i64, y: i64) -> [f64; 3] {
        let x = x.clamp(self.min_x, self.max_x);
        let y = y.clamp(self.min_y, self.max_y);
        let [r, g, b] = self.fetch(x, y).unwrap_or_default();
        [r as f64, g as f64, b as f64]
    }

    fn bilinear(&self, x: f64, y: f64) -> [u8; 3] {
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let p00 = self.clamped(x0, y0);
        let p10 = self.clamped(x0 + 1, y0);
        let p01 = self.clamped(x0, y0 + 1);
        let p11 = self.clamped(x0 + 1, y0 + 1);

        let mut result = [0u8; 3];
        for i in 0..3 {
            let v = p00[i] * (1.0 - fx) * (1.0 - fy)
                + p10[i] * fx * (1.0 - fy)
                + p01[i] * (1.0 - fx) * fy
                + p11[i] * fx * fy;
            result[i] = v.clamp(0.0, 255.0).round() as u8;
        }
        result
    }
}
