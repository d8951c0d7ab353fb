//! Update Author Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use bibliotek_app::domain::authors::models::AuthorUpdate;

use crate::{
    authors::{
        create::CreateAuthorRequest, errors::into_status_error, get::AuthorResponse, parse_date,
    },
    extensions::*,
    state::State,
};

/// Update Author Handler
///
/// Replaces the author's details.
#[endpoint(
    tags("authors"),
    summary = "Update Author",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    author: PathParam<Uuid>,
    json: JsonBody<CreateAuthorRequest>,
    depot: &mut Depot,
) -> Result<Json<AuthorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _librarian = depot.librarian_or_403()?;

    let request = json.into_inner();

    let author = state
        .app
        .authors
        .update_author(
            author.into_inner().into(),
            AuthorUpdate {
                first_name: request.first_name,
                last_name: request.last_name,
                date_of_birth: parse_date(request.date_of_birth, "date_of_birth")?,
                date_of_death: parse_date(request.date_of_death, "date_of_death")?,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(author.into()))
}
