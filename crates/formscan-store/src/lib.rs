//! FormScan Store - Template storage port and adapters
//!
//! This crate defines the `TemplateStore` port and provides an in-memory
//! adapter for development and tests plus an HTTP adapter that talks to a
//! running `formscan-api` server.

pub mod http;
pub mod memory;
pub mod ports;

pub use http::HttpTemplateStore;
pub use memory::MemoryTemplateStore;
pub use ports::TemplateStore;
