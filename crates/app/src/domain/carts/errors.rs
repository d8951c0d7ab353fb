//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    /// The book being added or removed does not exist in the catalog.
    #[error("book not found")]
    BookNotFound,

    /// No cart with the requested identifier.
    #[error("cart not found")]
    CartNotFound,

    /// The cart exists but belongs to someone else.
    #[error("cart belongs to another user")]
    Forbidden,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::CartNotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            // cart_items.book_uuid referencing a missing book
            Some(ErrorKind::ForeignKeyViolation) => Self::BookNotFound,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::NotNullViolation | ErrorKind::Other | _)
            | None => Self::Sql(error),
        }
    }
}
