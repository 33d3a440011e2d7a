//! Request and response bodies that are not domain models.
//!
//! Templates, OCR results and extraction results travel as their
//! `formscan-core` types.

mod request;
mod response;

pub use request::ExtractQuery;
pub use response::HealthResponse;
