//! FormScan Geo - Coordinate normalization and rectangle operations
//!
//! This crate converts between pointer, image-pixel and relative coordinates
//! and provides the rectangle predicates used when matching OCR regions.

pub mod normalize;
pub mod spatial;

pub use normalize::{pixels_to_relative, pointer_to_image_pixels, relative_to_pixels};
