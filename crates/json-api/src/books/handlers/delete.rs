//! Delete Book Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{books::errors::into_status_error, extensions::*, state::State};

/// Delete Book Handler
///
/// Deletes a book and its copies.
#[endpoint(tags("books"), summary = "Delete Book", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _librarian = depot.librarian_or_403()?;

    state
        .app
        .books
        .delete_book(book.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, test::TestClient};
    use testresult::TestResult;

    use bibliotek_app::domain::books::{BooksServiceError, MockBooksService, models::BookUuid};

    use crate::test_helpers::{inject_librarian, state_with_books};

    use super::*;

    fn make_service(repo: MockBooksService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_books(repo)))
                .hoop(inject_librarian)
                .push(Router::with_path("books/{book}").delete(handler)),
        )
    }

    #[tokio::test]
    async fn test_delete_returns_204() -> TestResult {
        let uuid = BookUuid::new();

        let mut repo = MockBooksService::new();

        repo.expect_delete_book()
            .once()
            .withf(move |b| *b == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/books/{uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_book_returns_404() -> TestResult {
        let uuid = BookUuid::new();

        let mut repo = MockBooksService::new();

        repo.expect_delete_book()
            .once()
            .return_once(|_| Err(BooksServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/books/{uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
