//! Author Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    authors::{errors::into_status_error, get::AuthorResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthorsResponse {
    /// The list of authors on this page
    pub authors: Vec<AuthorResponse>,

    /// The 1-based page that was returned
    pub page: u32,
}

/// Author Index Handler
///
/// Returns a page of authors ordered by name.
#[endpoint(
    tags("authors"),
    summary = "List Authors",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<AuthorsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.auth_user_or_401()?;

    let page = page.into_inner().unwrap_or(1).max(1);

    let authors = state
        .app
        .authors
        .list_authors(page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(AuthorsResponse {
        authors: authors.into_iter().map(Into::into).collect(),
        page,
    }))
}
