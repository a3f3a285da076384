//! Image decoding for Easel.
//!
//! This module provides functionality for:
//! - Unpacking `data:` URIs handed over by the browser's file reader
//! - Decoding the image bytes into an RGB raster with EXIF orientation applied
//!
//! # Architecture
//!
//! Decoding is a single synchronous call. A source that cannot be decoded
//! fails immediately with [`DecodeError`]; nothing is retried.
//!
//! # Examples
//!
//! ```ignore
//! use easel_core::decode::decode_data_uri;
//!
//! let image = decode_data_uri(&uri_from_file_picker)?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod data_uri;
mod source;
mod types;

pub use data_uri::{parse_data_uri, DataUri, DataUriError};
pub use source::{decode_data_uri, decode_image, get_orientation};
pub use types::{DecodeError, DecodedImage, Orientation};
