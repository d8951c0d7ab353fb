//! Create Author Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bibliotek_app::domain::authors::models::{AuthorUuid, NewAuthor};

use crate::{
    authors::{errors::into_status_error, get::AuthorResponse, parse_date},
    extensions::*,
    state::State,
};

/// Create Author Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAuthorRequest {
    pub first_name: String,

    pub last_name: String,

    /// `YYYY-MM-DD`, optional
    pub date_of_birth: Option<String>,

    /// `YYYY-MM-DD`, optional
    pub date_of_death: Option<String>,
}

/// Create Author Handler
#[endpoint(
    tags("authors"),
    summary = "Create Author",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Author created"),
        (status_code = StatusCode::FORBIDDEN, description = "Librarian role required"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateAuthorRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AuthorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _librarian = depot.librarian_or_403()?;

    let request = json.into_inner();

    let author = state
        .app
        .authors
        .create_author(NewAuthor {
            uuid: AuthorUuid::new(),
            first_name: request.first_name,
            last_name: request.last_name,
            date_of_birth: parse_date(request.date_of_birth, "date_of_birth")?,
            date_of_death: parse_date(request.date_of_death, "date_of_death")?,
        })
        .await
        .map_err(into_status_error)?;

    let uuid = author.uuid;

    res.add_header(LOCATION, format!("/authors/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(author.into()))
}
