//! OCR provider output, consumed but never produced by FormScan.

use serde::{Deserialize, Serialize};

use super::geometry::{ImageSize, PixelBox};

/// One recognized text span with its box in native image pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrRegion {
    pub text: String,
    pub bbox: PixelBox,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl OcrRegion {
    pub fn new(text: impl Into<String>, bbox: PixelBox) -> Self {
        Self { text: text.into(), bbox, confidence: None }
    }
}

/// A recognized page at the scanned document's native resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrPage {
    pub page_number: u32,
    pub width: f64,
    pub height: f64,

    #[serde(default)]
    pub text: String,

    /// Absent and empty both mean the provider found no regions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<OcrRegion>,
}

impl OcrPage {
    pub fn new(page_number: u32, width: f64, height: f64) -> Self {
        Self { page_number, width, height, text: String::new(), regions: Vec::new() }
    }

    pub fn with_regions(mut self, regions: Vec<OcrRegion>) -> Self {
        self.regions = regions;
        self
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }
}

/// Full OCR response for one scanned document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    pub pages: Vec<OcrPage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_pages: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl OcrResult {
    pub fn new(pages: Vec<OcrPage>) -> Self {
        Self { pages, ..Default::default() }
    }

    /// Page with the given number
    pub fn page(&self, page_number: u32) -> Option<&OcrPage> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }

    /// Page with the lowest page number, regardless of list order
    pub fn first_page(&self) -> Option<&OcrPage> {
        self.pages.iter().min_by_key(|p| p.page_number)
    }
}
