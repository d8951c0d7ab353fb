//! Update Book Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use bibliotek_app::domain::books::models::BookUpdate;

use crate::{
    books::{create::CreateBookRequest, errors::into_status_error, get::BookResponse},
    extensions::*,
    state::State,
};

/// Update Book Handler
///
/// Replaces the book's details. Import metadata is left untouched.
#[endpoint(tags("books"), summary = "Update Book", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    json: JsonBody<CreateBookRequest>,
    depot: &mut Depot,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _librarian = depot.librarian_or_403()?;

    let request = json.into_inner();

    let book = state
        .app
        .books
        .update_book(
            book.into_inner().into(),
            BookUpdate {
                title: request.title,
                author_uuid: request.author_uuid.into(),
                summary: request.summary,
                isbn: request.isbn,
                price: request.price,
                qty_on_hand: request.qty_on_hand,
                language: request.language,
                genres: request.genres,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(book.into()))
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, test::TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bibliotek_app::domain::books::{BooksServiceError, MockBooksService, models::BookUuid};

    use crate::test_helpers::{inject_librarian, make_book, state_with_books};

    use super::*;

    fn make_service(repo: MockBooksService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_books(repo)))
                .hoop(inject_librarian)
                .push(Router::with_path("books/{book}").put(handler)),
        )
    }

    #[tokio::test]
    async fn test_update_returns_200() -> TestResult {
        let uuid = BookUuid::new();
        let book = make_book(uuid);

        let mut repo = MockBooksService::new();

        repo.expect_update_book()
            .once()
            .withf(move |b, update| *b == uuid && update.price == 12_50)
            .return_once(move |_, _| Ok(book));

        let res = TestClient::put(format!("http://example.com/books/{uuid}"))
            .json(&json!({
                "title": "Dune",
                "author_uuid": Uuid::nil(),
                "isbn": "9780441013593",
                "price": 12_50,
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_book_returns_404() -> TestResult {
        let uuid = BookUuid::new();

        let mut repo = MockBooksService::new();

        repo.expect_update_book()
            .once()
            .return_once(|_, _| Err(BooksServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/books/{uuid}"))
            .json(&json!({
                "title": "Dune",
                "author_uuid": Uuid::nil(),
                "isbn": "9780441013593",
                "price": 12_50,
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
