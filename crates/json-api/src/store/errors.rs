//! Store Errors

use bibliotek_app::domain::carts::CartsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::BookNotFound => StatusError::not_found().brief("Book not found"),
        CartsServiceError::CartNotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::Forbidden => {
            StatusError::forbidden().brief("This cart belongs to another user")
        }
        CartsServiceError::InvalidData => StatusError::bad_request().brief("Invalid cart payload"),
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
