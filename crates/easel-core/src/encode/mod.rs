//! Image encoding for Easel.
//!
//! This module provides functionality for:
//! - Encoding rendered rasters to JPEG with configurable quality
//! - Wrapping the encoded bytes as `data:` URIs for the gallery
//!
//! # Examples
//!
//! ```ignore
//! use easel_core::encode::{encode_image, OutputImage, DEFAULT_JPEG_QUALITY};
//!
//! let jpeg = encode_image(&rendered, DEFAULT_JPEG_QUALITY)?;
//! let slot = OutputImage::from_jpeg(rendered.width, rendered.height, &jpeg);
//! ```

mod data_uri;
mod jpeg;

pub use data_uri::{to_data_uri, OutputImage, JPEG_MIME};
pub use jpeg::{encode_image, encode_jpeg, EncodeError, DEFAULT_JPEG_QUALITY};
