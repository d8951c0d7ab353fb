//! Integration Errors

use bibliotek_app::integrations::accounting::AccountingServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: AccountingServiceError) -> StatusError {
    match error {
        AccountingServiceError::StateMismatch => {
            StatusError::bad_request().brief("OAuth state does not match the pending handshake")
        }
        AccountingServiceError::NotConnected => {
            StatusError::not_found().brief("No accounting connection")
        }
        AccountingServiceError::Provider(source) => {
            error!("accounting provider error: {source}");

            StatusError::bad_gateway().brief("The accounting provider rejected the request")
        }
        AccountingServiceError::Sql(source) => {
            error!("integration storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
