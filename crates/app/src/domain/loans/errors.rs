//! Loans service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoansServiceError {
    #[error("book copy not found")]
    NotFound,

    /// Renewal dates cannot be in the past.
    #[error("renewal date is in the past")]
    DueDateInPast,

    /// Renewal dates cannot be more than four weeks out.
    #[error("renewal date is more than four weeks ahead")]
    DueDateTooFar,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for LoansServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::Other
                | _,
            )
            | None => Self::Sql(error),
        }
    }
}
