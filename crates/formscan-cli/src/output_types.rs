use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

/// Output for template validate
#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    pub file: String,
    pub name: String,
    pub language: String,
    pub field_count: usize,
}

/// One configuration entry with its origin
#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: String,
}

/// Output for template delete
#[derive(Debug, Serialize)]
pub struct DeleteOutput {
    pub id: String,
    pub deleted: bool,
}

#[derive(Tabled)]
pub struct TemplateRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Language")]
    pub language: String,
    #[tabled(rename = "Fields")]
    pub fields: usize,
    #[tabled(rename = "Updated")]
    pub updated_at: String,
}

#[derive(Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub kind: String,
    #[tabled(rename = "X")]
    pub x: String,
    #[tabled(rename = "Y")]
    pub y: String,
    #[tabled(rename = "Width")]
    pub width: String,
    #[tabled(rename = "Height")]
    pub height: String,
}

#[derive(Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
