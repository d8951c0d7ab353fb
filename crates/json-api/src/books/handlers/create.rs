//! Create Book Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use bibliotek_app::domain::books::models::{BookUuid, NewBook};

use crate::{
    books::{errors::into_status_error, get::BookResponse},
    extensions::*,
    state::State,
};

/// Create Book Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateBookRequest {
    pub title: String,

    /// The author's unique identifier
    pub author_uuid: Uuid,

    #[serde(default)]
    pub summary: String,

    pub isbn: String,

    /// Price in minor currency units
    pub price: u64,

    #[serde(default)]
    pub qty_on_hand: u32,

    pub language: Option<String>,

    #[serde(default)]
    pub genres: Vec<String>,
}

impl From<CreateBookRequest> for NewBook {
    fn from(request: CreateBookRequest) -> Self {
        NewBook {
            uuid: BookUuid::new(),
            title: request.title,
            author_uuid: request.author_uuid.into(),
            summary: request.summary,
            isbn: request.isbn,
            price: request.price,
            qty_on_hand: request.qty_on_hand,
            language: request.language,
            genres: request.genres,
            metadata: json!({}),
        }
    }
}

/// Create Book Handler
#[endpoint(
    tags("books"),
    summary = "Create Book",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Book created"),
        (status_code = StatusCode::CONFLICT, description = "A book with this ISBN already exists"),
        (status_code = StatusCode::FORBIDDEN, description = "Librarian role required"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBookRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _librarian = depot.librarian_or_403()?;

    let book = state
        .app
        .books
        .create_book(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let uuid = book.uuid;

    res.add_header(LOCATION, format!("/books/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(book.into()))
}
