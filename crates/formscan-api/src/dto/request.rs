use formscan_extract::ExportFormat;
use serde::Deserialize;

/// Query string of the extraction endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ExtractQuery {
    /// OCR page to read; defaults to the lowest page number
    pub page: Option<u32>,

    #[serde(default)]
    pub format: ExportFormat,
}
