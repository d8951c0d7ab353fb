//! Imports
//!
//! Bulk catalog import from CSV. Known columns map onto book fields;
//! anything else is kept in the book's `metadata` document.

pub mod errors;
pub mod models;
mod parser;
pub mod service;

pub use errors::ImportsServiceError;
pub use parser::parse_catalog_csv;
pub use service::*;
