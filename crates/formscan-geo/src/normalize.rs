//! Conversions between pointer, image-pixel and relative coordinates.
//!
//! Zoom only enters at the pointer step. Once a point is in image pixels,
//! converting to relative units depends on the image size alone, so a box
//! sampled at any zoom level maps to the same relative geometry.

use formscan_core::error::{FormscanError, Result};
use formscan_core::models::{ImageSize, PixelBox, Point, RelativeBox};

/// Convert a pointer position on screen into image pixels
pub fn pointer_to_image_pixels(pointer: Point, image_origin: Point, zoom: f64) -> Result<Point> {
    if !pointer.is_finite() || !image_origin.is_finite() || !zoom.is_finite() {
        return Err(FormscanError::geometry("pointer coordinates and zoom must be finite"));
    }
    if zoom <= 0.0 {
        return Err(FormscanError::geometry(format!("zoom must be positive, got {}", zoom)));
    }

    Ok(Point::new((pointer.x - image_origin.x) / zoom, (pointer.y - image_origin.y) / zoom))
}

/// Express a pixel box as fractions of the image size, clamped to [0, 1]
pub fn pixels_to_relative(bbox: &PixelBox, size: ImageSize) -> Result<RelativeBox> {
    size.validate()?;
    if !bbox.is_finite() {
        return Err(FormscanError::geometry("pixel box coordinates must be finite"));
    }

    Ok(RelativeBox::new(
        unit_clamp(bbox.x / size.width),
        unit_clamp(bbox.y / size.height),
        unit_clamp(bbox.width / size.width),
        unit_clamp(bbox.height / size.height),
    ))
}

/// Project a relative box onto an image of the given size
pub fn relative_to_pixels(bbox: &RelativeBox, size: ImageSize) -> Result<PixelBox> {
    size.validate()?;

    Ok(PixelBox::new(
        bbox.x * size.width,
        bbox.y * size.height,
        bbox.width * size.width,
        bbox.height * size.height,
    ))
}

fn unit_clamp(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
