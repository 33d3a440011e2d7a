//! FormScan Core - Domain models, field registry, and configuration
//!
//! This crate contains the template and OCR data model shared by every
//! FormScan crate, the error taxonomy, and the layered configuration.

pub mod config;
pub mod error;
pub mod models;
pub mod registry;

pub use error::{ErrorKind, FormscanError, Result};
pub use registry::FieldRegistry;
