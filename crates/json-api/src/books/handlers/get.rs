//! Get Book Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bibliotek_app::domain::books::models::Book;

use crate::{books::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookResponse {
    /// The unique identifier of the book
    pub uuid: Uuid,

    pub title: String,

    /// The author's unique identifier
    pub author_uuid: Uuid,

    pub summary: String,

    pub isbn: String,

    /// Price in minor currency units
    pub price: u64,

    /// Units in stock at the store
    pub qty_on_hand: u32,

    pub language: Option<String>,

    pub genres: Vec<String>,

    /// The date and time the book was created
    pub created_at: String,

    /// The date and time the book was last updated
    pub updated_at: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        BookResponse {
            uuid: book.uuid.into(),
            title: book.title,
            author_uuid: book.author_uuid.into(),
            summary: book.summary,
            isbn: book.isbn,
            price: book.price,
            qty_on_hand: book.qty_on_hand,
            language: book.language,
            genres: book.genres,
            created_at: book.created_at.to_string(),
            updated_at: book.updated_at.to_string(),
        }
    }
}

/// Get Book Handler
///
/// Returns a book.
#[endpoint(tags("books"), summary = "Get Book", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.auth_user_or_401()?;

    let book = state
        .app
        .books
        .get_book(book.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(book.into()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use bibliotek_app::domain::books::{BooksServiceError, MockBooksService, models::BookUuid};

    use crate::test_helpers::{inject_member, make_book, state_with_books};

    use super::*;

    fn make_service(repo: MockBooksService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_books(repo)))
                .hoop(inject_member)
                .push(Router::with_path("books/{book}").get(handler)),
        )
    }

    #[tokio::test]
    async fn test_get_returns_200() -> TestResult {
        let uuid = BookUuid::new();
        let book = make_book(uuid);

        let mut repo = MockBooksService::new();

        repo.expect_get_book()
            .once()
            .withf(move |b| *b == uuid)
            .return_once(move |_| Ok(book));

        let mut res = TestClient::get(format!("http://example.com/books/{uuid}"))
            .send(&make_service(repo))
            .await;

        let body: BookResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.title, "Dune");
        assert_eq!(body.price, 10_00);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_book_returns_404() -> TestResult {
        let uuid = BookUuid::new();

        let mut repo = MockBooksService::new();

        repo.expect_get_book()
            .once()
            .return_once(|_| Err(BooksServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/books/{uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
