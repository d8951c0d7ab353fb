//! Import Models

use serde_json::{Map, Value};

/// One parsed CSV row, ready to become a book.
#[derive(Debug, Clone, PartialEq)]
pub struct BookImportRow {
    pub title: String,
    pub author_first_name: String,
    pub author_last_name: String,
    pub isbn: String,
    /// Minor currency units.
    pub price: u64,
    pub qty_on_hand: u32,
    pub summary: String,
    pub language: Option<String>,
    /// Pipe-separated in the CSV.
    pub genres: Vec<String>,
    /// Columns the importer does not recognize.
    pub metadata: Map<String, Value>,
}

/// Why a row was skipped, with its 1-based CSV line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// What an import run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub created: u64,
    pub authors_created: u64,
    pub skipped: Vec<SkippedRow>,
}
