use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::geometry::RelativeBox;
use crate::error::{FormscanError, Result};
use crate::registry::{names_match, FieldRegistry};

/// Unique identifier for a template, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub Uuid);

impl TemplateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TemplateId {
    type Err = FormscanError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(TemplateId)
            .map_err(|_| FormscanError::validation(format!("Invalid template id: {}", s)))
    }
}

/// Document language used to hint the OCR provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Por,
    Eng,
    Spa,
    Fra,
}

impl Language {
    /// Three-letter code understood by the OCR provider
    pub fn code(&self) -> &'static str {
        match self {
            Language::Por => "por",
            Language::Eng => "eng",
            Language::Spa => "spa",
            Language::Fra => "fra",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Por => "Portuguese",
            Language::Eng => "English",
            Language::Spa => "Spanish",
            Language::Fra => "French",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = FormscanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "por" | "pt" | "portuguese" => Ok(Language::Por),
            "eng" | "en" | "english" => Ok(Language::Eng),
            "spa" | "es" | "spanish" => Ok(Language::Spa),
            "fra" | "fr" | "french" => Ok(Language::Fra),
            _ => Err(FormscanError::validation(format!(
                "Unsupported language: {}. Use por, eng, spa, or fra",
                s
            ))),
        }
    }
}

/// Expected content of a field. Carried as a hint, never used to reject values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
    Email,
}

/// One named region of a template, in relative units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: FieldType,

    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Field {
    pub fn new(name: impl Into<String>, bounds: RelativeBox) -> Self {
        Self {
            name: name.into(),
            kind: FieldType::default(),
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
        }
    }

    pub fn with_kind(mut self, kind: FieldType) -> Self {
        self.kind = kind;
        self
    }

    pub fn bounds(&self) -> RelativeBox {
        RelativeBox::new(self.x, self.y, self.width, self.height)
    }
}

/// A persisted template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub language: Language,

    /// URI or inline data URL of the reference image
    pub reference_image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub fields: Vec<Field>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Template {
    /// Build a template from a validated creation request
    pub fn from_new(request: NewTemplate, id: TemplateId, now: DateTime<Utc>) -> Result<Self> {
        let request = request.validated()?;
        Ok(Self {
            id,
            name: request.name,
            language: request.language,
            reference_image: request.reference_image,
            description: request.description,
            fields: request.fields,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| names_match(&f.name, name))
    }
}

/// Creation request for a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,

    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub reference_image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub fields: Vec<Field>,
}

impl NewTemplate {
    pub fn new(name: impl Into<String>, language: Language, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            language,
            reference_image: String::new(),
            description: None,
            fields,
        }
    }

    pub fn reference_image(mut self, reference_image: impl Into<String>) -> Self {
        self.reference_image = reference_image.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Trim the name and check every field; a template is never stored
    /// without a name or without fields.
    pub fn validated(mut self) -> Result<Self> {
        self.name = validate_template_name(&self.name)?;
        self.fields = validate_template_fields(self.fields)?;
        Ok(self)
    }
}

impl From<Template> for NewTemplate {
    fn from(template: Template) -> Self {
        Self {
            name: template.name,
            language: template.language,
            reference_image: template.reference_image,
            description: template.description,
            fields: template.fields,
        }
    }
}

/// Partial update; only supplied attributes change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Replaces the whole field list when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
}

impl TemplateUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.language.is_none()
            && self.reference_image.is_none()
            && self.description.is_none()
            && self.fields.is_none()
    }

    /// Merge into `template`. Everything is validated before the template
    /// is touched, so a failed update leaves it unchanged.
    pub fn apply_to(self, template: &mut Template, now: DateTime<Utc>) -> Result<()> {
        let name = self.name.as_deref().map(validate_template_name).transpose()?;
        let fields = self.fields.map(validate_template_fields).transpose()?;

        if let Some(name) = name {
            template.name = name;
        }
        if let Some(language) = self.language {
            template.language = language;
        }
        if let Some(reference_image) = self.reference_image {
            template.reference_image = reference_image;
        }
        if let Some(description) = self.description {
            template.description = Some(description);
        }
        if let Some(fields) = fields {
            template.fields = fields;
        }
        template.updated_at = now;
        Ok(())
    }
}

fn validate_template_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FormscanError::validation("Template name must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_template_fields(fields: Vec<Field>) -> Result<Vec<Field>> {
    if fields.is_empty() {
        return Err(FormscanError::validation("A template needs at least one field"));
    }
    Ok(FieldRegistry::from_persisted(fields)?.to_persisted())
}
