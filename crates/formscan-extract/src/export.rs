//! Rendering of extraction results for download and the clipboard.

use formscan_core::error::{FormscanError, Result};
use formscan_core::models::ExtractionResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Text,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Text => "text/plain; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "text",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = FormscanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(FormscanError::validation(format!(
                "Unsupported export format: {}. Use json, csv, or text",
                s
            ))),
        }
    }
}

pub fn export(result: &ExtractionResult, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => to_json(result),
        ExportFormat::Csv => to_csv(result),
        ExportFormat::Text => Ok(to_text(result)),
    }
}

/// Pretty-printed `{fields, warnings}`
pub fn to_json(result: &ExtractionResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// `field,value` header, then one fully quoted row per field
pub fn to_csv(result: &ExtractionResult) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(b"field,value\n".to_vec());

    for (name, value) in result.fields.iter() {
        writer.write_record([name, value]).map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FormscanError::Serialization(format!("Failed to flush CSV: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| FormscanError::Serialization(format!("CSV output is not UTF-8: {}", e)))
}

/// One `name: value` line per field
pub fn to_text(result: &ExtractionResult) -> String {
    result
        .fields
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn csv_error(err: csv::Error) -> FormscanError {
    FormscanError::Serialization(format!("Failed to write CSV: {}", err))
}
