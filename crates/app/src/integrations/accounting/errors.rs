//! Accounting service errors.

use sqlx::Error;
use thiserror::Error;

use crate::integrations::accounting::client::AccountingClientError;

#[derive(Debug, Error)]
pub enum AccountingServiceError {
    /// The callback `state` does not match the one we stored, or there is no
    /// pending handshake for this user.
    #[error("oauth state mismatch")]
    StateMismatch,

    /// The user has no accounting connection.
    #[error("accounting service is not connected")]
    NotConnected,

    #[error("accounting provider error")]
    Provider(#[from] AccountingClientError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AccountingServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
