//! Delete Author Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{authors::errors::into_status_error, extensions::*, state::State};

/// Delete Author Handler
///
/// Deletes an author. Fails when books still reference them.
#[endpoint(
    tags("authors"),
    summary = "Delete Author",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    author: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _librarian = depot.librarian_or_403()?;

    state
        .app
        .authors
        .delete_author(author.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
