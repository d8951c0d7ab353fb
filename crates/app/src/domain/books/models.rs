//! Book Models

use jiff::Timestamp;
use serde_json::Value;

use crate::{domain::authors::models::AuthorUuid, uuids::TypedUuid};

/// Book UUID
pub type BookUuid = TypedUuid<Book>;

/// Book Model
///
/// `price` is in minor currency units; `metadata` carries free-form columns
/// picked up by the CSV importer.
#[derive(Debug, Clone)]
pub struct Book {
    pub uuid: BookUuid,
    pub title: String,
    pub author_uuid: AuthorUuid,
    pub summary: String,
    pub isbn: String,
    pub price: u64,
    pub qty_on_hand: u32,
    pub language: Option<String>,
    pub genres: Vec<String>,
    pub metadata: Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Book Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub uuid: BookUuid,
    pub title: String,
    pub author_uuid: AuthorUuid,
    pub summary: String,
    pub isbn: String,
    pub price: u64,
    pub qty_on_hand: u32,
    pub language: Option<String>,
    pub genres: Vec<String>,
    pub metadata: Value,
}

/// Book Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct BookUpdate {
    pub title: String,
    pub author_uuid: AuthorUuid,
    pub summary: String,
    pub isbn: String,
    pub price: u64,
    pub qty_on_hand: u32,
    pub language: Option<String>,
    pub genres: Vec<String>,
}
