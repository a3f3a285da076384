//! Easel Core - crop/rotate/flip editing for an image gallery
//!
//! This crate provides the core functionality behind the Easel gallery:
//! decoding uploads, the rotated-bounds calculator, the crop/rotate/flip
//! rasterizer, JPEG encoding, and the gallery/editor state machine.
//!
//! # Module Structure
//!
//! - `decode` - `data:` URI parsing and image decoding
//! - `encode` - JPEG encoding and output `data:` URIs
//! - `transform` - bounding box, affine transform, rasterizer
//! - `gallery` - gallery slots, editor state, controller

pub mod decode;
pub mod encode;
pub mod gallery;
pub mod transform;

pub use decode::{decode_data_uri, DecodeError, DecodedImage};
pub use encode::OutputImage;
pub use gallery::{EditAction, Editor, Gallery, GalleryController, GalleryError};
pub use transform::{
    bounding_box, render, BoundingBox, FlipState, Rectangle, RenderError, RenderOptions,
};
