//! Imports service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportsServiceError {
    /// The CSV itself could not be read (bad encoding, ragged rows).
    #[error("malformed csv: {0}")]
    MalformedCsv(String),

    /// The header row is missing a required column.
    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ImportsServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<csv::Error> for ImportsServiceError {
    fn from(error: csv::Error) -> Self {
        Self::MalformedCsv(error.to_string())
    }
}
