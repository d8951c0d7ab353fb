//! Authors

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub(crate) use repository::PgAuthorsRepository;

pub use errors::AuthorsServiceError;
pub use service::*;
