//! Loan Errors

use bibliotek_app::domain::loans::LoansServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: LoansServiceError) -> StatusError {
    match error {
        LoansServiceError::NotFound => StatusError::not_found().brief("Book copy not found"),
        LoansServiceError::DueDateInPast => {
            StatusError::bad_request().brief("Renewal date cannot be in the past")
        }
        LoansServiceError::DueDateTooFar => {
            StatusError::bad_request().brief("Renewal date cannot be more than four weeks ahead")
        }
        LoansServiceError::InvalidData => StatusError::bad_request().brief("Invalid loan payload"),
        LoansServiceError::Sql(source) => {
            error!("loans storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
