use formscan_core::error::Result;
use formscan_core::models::Point;
use formscan_geo::normalize::pointer_to_image_pixels;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.25;
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Where the reference image sits on screen and how much it is scaled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    origin: Point,
    zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { origin: Point::origin(), zoom: DEFAULT_ZOOM }
    }
}

impl Viewport {
    pub fn new(origin: Point) -> Self {
        Self { origin, zoom: DEFAULT_ZOOM }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Move the image on screen, e.g. after the surrounding layout scrolls
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Zoom as a whole percentage, for display
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.zoom + ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(self.zoom - ZOOM_STEP)
    }

    pub fn reset_zoom(&mut self) -> f64 {
        self.set_zoom(DEFAULT_ZOOM)
    }

    /// Set the zoom, clamped to the supported range. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
        self.zoom
    }

    /// Convert a raw pointer position into image pixels
    pub fn to_image(&self, pointer: Point) -> Result<Point> {
        pointer_to_image_pixels(pointer, self.origin, self.zoom)
    }
}
