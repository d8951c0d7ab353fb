//! Get Author Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bibliotek_app::domain::authors::models::Author;

use crate::{authors::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthorResponse {
    /// The unique identifier of the author
    pub uuid: Uuid,

    pub first_name: String,

    pub last_name: String,

    /// Date of birth, ISO 8601, when known
    pub date_of_birth: Option<String>,

    /// Date of death, ISO 8601, when known
    pub date_of_death: Option<String>,

    /// The date and time the author was created
    pub created_at: String,

    /// The date and time the author was last updated
    pub updated_at: String,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        AuthorResponse {
            uuid: author.uuid.into(),
            first_name: author.first_name,
            last_name: author.last_name,
            date_of_birth: author.date_of_birth.as_ref().map(ToString::to_string),
            date_of_death: author.date_of_death.as_ref().map(ToString::to_string),
            created_at: author.created_at.to_string(),
            updated_at: author.updated_at.to_string(),
        }
    }
}

/// Get Author Handler
///
/// Returns an author.
#[endpoint(
    tags("authors"),
    summary = "Get Author",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    author: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AuthorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.auth_user_or_401()?;

    let author = state
        .app
        .authors
        .get_author(author.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(author.into()))
}
