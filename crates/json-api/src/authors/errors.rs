//! Author Errors

use bibliotek_app::domain::authors::AuthorsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: AuthorsServiceError) -> StatusError {
    match error {
        AuthorsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Author already exists")
        }
        AuthorsServiceError::StillReferenced => {
            StatusError::conflict().brief("Books still reference this author")
        }
        AuthorsServiceError::MissingRequiredData | AuthorsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid author payload")
        }
        AuthorsServiceError::NotFound => StatusError::not_found().brief("Author not found"),
        AuthorsServiceError::Sql(source) => {
            error!("authors storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
