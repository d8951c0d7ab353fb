//! Stats service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsServiceError {
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for StatsServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
