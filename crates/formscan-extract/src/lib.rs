//! FormScan Extract - Applying templates to OCR output
//!
//! `ExtractionMapper` assigns OCR regions to template fields by overlap;
//! `export` renders the result for download or the clipboard.

pub mod export;
pub mod mapper;

pub use export::{export, ExportFormat};
pub use mapper::{ExtractionMapper, MapperOptions};
