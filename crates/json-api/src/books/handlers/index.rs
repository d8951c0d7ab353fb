//! Book Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    books::{errors::into_status_error, get::BookResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BooksResponse {
    /// The list of books on this page
    pub books: Vec<BookResponse>,

    /// The 1-based page that was returned
    pub page: u32,
}

/// Book Index Handler
///
/// Returns a page of books ordered by title.
#[endpoint(tags("books"), summary = "List Books", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<BooksResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.auth_user_or_401()?;

    let page = page.into_inner().unwrap_or(1).max(1);

    let books = state
        .app
        .books
        .list_books(page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(BooksResponse {
        books: books.into_iter().map(Into::into).collect(),
        page,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use bibliotek_app::domain::books::{MockBooksService, models::BookUuid};

    use crate::test_helpers::{inject_member, make_book, state_with_books};

    use super::*;

    fn make_service(repo: MockBooksService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_books(repo)))
                .hoop(inject_member)
                .push(Router::with_path("books").get(handler)),
        )
    }

    #[tokio::test]
    async fn test_index_returns_books() -> TestResult {
        let mut repo = MockBooksService::new();

        repo.expect_list_books()
            .once()
            .withf(|page| *page == 1)
            .return_once(|_| Ok(vec![make_book(BookUuid::new())]));

        let mut res = TestClient::get("http://example.com/books")
            .send(&make_service(repo))
            .await;

        let body: BooksResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.books.len(), 1);

        Ok(())
    }
}
