//! Geometry primitives shared across all formscan crates.
//!
//! Two coordinate spaces exist. Pixel geometry (`Point`, `PixelBox`) is local
//! to one image at one resolution. Relative geometry (`RelativeBox`) expresses
//! positions as fractions of the image size and is the only geometry that is
//! persisted.

use serde::{Deserialize, Serialize};

use crate::error::{FormscanError, Result};

/// Slack allowed on `x + width <= 1` so sums like `0.7 + 0.3` are not rejected
pub const RELATIVE_EPSILON: f64 = 1e-9;

/// A point in pointer, viewport or image-pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Zero-sized box at a point
    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    /// Bounding box of two corners, whichever direction they were dragged in
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Rectangle in relative units, each coordinate a fraction of the image size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RelativeBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RelativeBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Check the field geometry invariants: every coordinate in [0,1],
    /// positive size, and the box stays inside the image.
    pub fn validate(&self) -> Result<()> {
        let coords = [("x", self.x), ("y", self.y), ("width", self.width), ("height", self.height)];

        for (name, value) in coords {
            if !value.is_finite() {
                return Err(FormscanError::geometry(format!("{} must be finite, got {}", name, value)));
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(FormscanError::geometry(format!(
                    "{} must lie in [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(FormscanError::geometry(format!(
                "width and height must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if self.x + self.width > 1.0 + RELATIVE_EPSILON {
            return Err(FormscanError::geometry(format!(
                "x + width exceeds the image ({} + {})",
                self.x, self.width
            )));
        }

        if self.y + self.height > 1.0 + RELATIVE_EPSILON {
            return Err(FormscanError::geometry(format!(
                "y + height exceeds the image ({} + {})",
                self.y, self.height
            )));
        }

        Ok(())
    }
}

/// Pixel dimensions of an image at a given resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Fails unless both dimensions are finite and strictly positive
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(FormscanError::geometry(format!(
                "image dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// The whole image as a pixel box anchored at the origin
    pub fn bounds(&self) -> PixelBox {
        PixelBox::new(0.0, 0.0, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_handles_all_drag_directions() {
        let a = Point::new(50.0, 40.0);
        let expected = PixelBox::new(10.0, 20.0, 40.0, 20.0);

        assert_eq!(PixelBox::from_corners(a, Point::new(10.0, 20.0)), expected);
        assert_eq!(PixelBox::from_corners(Point::new(10.0, 20.0), a), expected);
        assert_eq!(
            PixelBox::from_corners(Point::new(10.0, 40.0), Point::new(50.0, 20.0)),
            expected
        );
        assert_eq!(
            PixelBox::from_corners(Point::new(50.0, 20.0), Point::new(10.0, 40.0)),
            expected
        );
    }

    #[test]
    fn test_relative_box_accepts_edge_aligned_box() {
        assert!(RelativeBox::new(0.7, 0.0, 0.3, 1.0).validate().is_ok());
        assert!(RelativeBox::new(0.0, 0.0, 1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_relative_box_rejects_zero_width() {
        let err = RelativeBox::new(0.1, 0.1, 0.0, 0.2).validate().unwrap_err();
        assert!(matches!(err, FormscanError::Geometry { .. }));
    }

    #[test]
    fn test_relative_box_rejects_overflow() {
        let err = RelativeBox::new(0.8, 0.1, 0.3, 0.2).validate().unwrap_err();
        assert!(matches!(err, FormscanError::Geometry { .. }));

        let err = RelativeBox::new(0.1, 0.9, 0.2, 0.2).validate().unwrap_err();
        assert!(matches!(err, FormscanError::Geometry { .. }));
    }

    #[test]
    fn test_relative_box_rejects_non_finite() {
        let err = RelativeBox::new(f64::NAN, 0.1, 0.2, 0.2).validate().unwrap_err();
        assert!(matches!(err, FormscanError::Geometry { .. }));
    }

    #[test]
    fn test_image_size_validation() {
        assert!(ImageSize::new(1000.0, 1400.0).validate().is_ok());
        assert!(ImageSize::new(0.0, 1400.0).validate().is_err());
        assert!(ImageSize::new(1000.0, -1.0).validate().is_err());
    }
}
