//! Error types for FormScan

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormscanError {
    // Authoring and template errors
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    #[error("Invalid geometry: {reason}")]
    Geometry { reason: String },

    // Store errors
    #[error("Not found: {id}")]
    NotFound { id: String },

    #[error("A save is already in progress for this draft")]
    SaveInProgress,

    #[error("Storage backend error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification used by adapters (HTTP status, exit codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Geometry,
    NotFound,
    Conflict,
    Internal,
}

impl FormscanError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation { reason: reason.into() }
    }

    pub fn geometry(reason: impl Into<String>) -> Self {
        Self::Geometry { reason: reason.into() }
    }

    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FormscanError::Validation { .. } => ErrorKind::Validation,
            FormscanError::Geometry { .. } => ErrorKind::Geometry,
            FormscanError::NotFound { .. } => ErrorKind::NotFound,
            FormscanError::SaveInProgress => ErrorKind::Conflict,
            FormscanError::ConfigInvalid { .. } => ErrorKind::Validation,
            FormscanError::Storage(_) | FormscanError::Serialization(_) => ErrorKind::Internal,
        }
    }

    /// Message without the category prefix, for callers that report the
    /// category separately (HTTP error bodies)
    pub fn reason(&self) -> String {
        match self {
            FormscanError::Validation { reason } | FormscanError::Geometry { reason } => reason.clone(),
            FormscanError::NotFound { id } => id.clone(),
            FormscanError::Storage(reason) | FormscanError::Serialization(reason) => reason.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for FormscanError {
    fn from(err: serde_json::Error) -> Self {
        FormscanError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FormscanError>;
