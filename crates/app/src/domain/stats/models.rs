//! Catalog Stats Models

/// Headline counts for the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub books: u64,
    pub copies: u64,
    pub copies_available: u64,
    pub authors: u64,
}
