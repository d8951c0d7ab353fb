//! Books

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub(crate) use repository::PgBooksRepository;

pub use errors::BooksServiceError;
pub use service::*;
