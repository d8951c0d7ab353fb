//! Home Page Handler
//!
//! Headline catalog counts plus the caller's visit counter, bumped on
//! every request.

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Home page response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HomeResponse {
    /// Number of books in the catalog
    pub books: u64,

    /// Number of physical copies
    pub copies: u64,

    /// Number of copies currently available
    pub copies_available: u64,

    /// Number of authors
    pub authors: u64,

    /// How many times the caller has seen this page
    pub visits: u64,
}

/// Home Page Handler
#[endpoint(
    tags("home"),
    summary = "Catalog overview",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HomeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.auth_user_or_401()?;

    let visits = state
        .app
        .users
        .record_visit(user.uuid)
        .await
        .or_500("failed to record visit")?;

    let stats = state
        .app
        .stats
        .catalog_stats()
        .await
        .or_500("failed to load catalog stats")?;

    Ok(Json(HomeResponse {
        books: stats.books,
        copies: stats.copies,
        copies_available: stats.copies_available,
        authors: stats.authors,
        visits,
    }))
}

#[cfg(test)]
mod tests {
    use bibliotek_app::domain::{
        stats::{MockStatsService, models::CatalogStats},
        users::MockUsersService,
    };
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, inject_member, state_with_stats};

    use super::*;

    fn make_service(stats: MockStatsService, users: MockUsersService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_stats(stats, users)))
                .hoop(inject_member)
                .push(Router::new().get(handler)),
        )
    }

    #[tokio::test]
    async fn test_home_counts_and_visits() -> TestResult {
        let mut stats = MockStatsService::new();
        let mut users = MockUsersService::new();

        users
            .expect_record_visit()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(4));

        stats.expect_catalog_stats().once().return_once(|| {
            Ok(CatalogStats {
                books: 12,
                copies: 30,
                copies_available: 7,
                authors: 5,
            })
        });

        let response: HomeResponse = TestClient::get("http://example.com")
            .send(&make_service(stats, users))
            .await
            .take_json()
            .await?;

        assert_eq!(response.books, 12);
        assert_eq!(response.copies_available, 7);
        assert_eq!(response.visits, 4);

        Ok(())
    }
}
