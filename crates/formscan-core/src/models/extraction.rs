//! Output of mapping a template onto an OCR result.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-fatal anomaly found while mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// The projected field box fell partly outside the scanned page
    Clamped,
    /// No region overlapped the field enough to be selected
    NoMatch,
    /// The page carried no regions at all
    EmptyPage,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WarningKind::Clamped => "clamped",
            WarningKind::NoMatch => "no-match",
            WarningKind::EmptyPage => "empty-page",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub kind: WarningKind,
}

impl Warning {
    pub fn for_field(field: impl Into<String>, kind: WarningKind) -> Self {
        Self { field: Some(field.into()), kind }
    }

    pub fn empty_page() -> Self {
        Self { field: None, kind: WarningKind::EmptyPage }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {}", field, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Field name to value mapping that keeps template order.
///
/// Serialized as a JSON object whose keys appear in insertion order.
pub type FieldValues = IndexMap<String, String>;

/// Result of one mapping call; immutable once produced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub fields: FieldValues,
    pub warnings: Vec<Warning>,
}

impl ExtractionResult {
    pub fn value(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
