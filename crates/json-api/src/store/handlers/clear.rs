//! Clear Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    state::State,
    store::{CartResponse, CartSummaryResponse, errors::into_status_error, notify_cart_updated},
};

/// Clear Cart Handler
///
/// Empties the caller's cart.
#[endpoint(tags("store"), summary = "Clear Cart", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    view: QueryParam<String, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.auth_user_or_401()?;

    let view = view.into_view_mode()?;

    let summary = state
        .app
        .carts
        .clear_cart(user.uuid)
        .await
        .map_err(into_status_error)?;

    notify_cart_updated(res);

    match view {
        ViewMode::Summary => res.render(Json(CartSummaryResponse::from(summary))),
        ViewMode::Full => {
            let cart = state
                .app
                .carts
                .current_cart(user.uuid)
                .await
                .map_err(into_status_error)?;

            res.render(Json(CartResponse::from(cart)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use bibliotek_app::domain::carts::{MockCartsService, models::CartUuid};

    use crate::test_helpers::{
        TEST_USER_UUID, inject_member, make_cart_view, make_summary, state_with_carts,
    };

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_carts(repo)))
                .hoop(inject_member)
                .push(Router::with_path("store/clear").post(handler)),
        )
    }

    #[tokio::test]
    async fn test_clear_empties_the_cart() -> TestResult {
        let cart_uuid = CartUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_clear_cart()
            .once()
            .withf(|owner| *owner == TEST_USER_UUID)
            .return_once(move |_| Ok(make_summary(cart_uuid, &[])));

        repo.expect_current_cart()
            .once()
            .return_once(move |owner| Ok(make_cart_view(cart_uuid, owner, vec![])));

        let mut res = TestClient::post("http://example.com/store/clear")
            .send(&make_service(repo))
            .await;

        let trigger = res.headers().get("hx-trigger").cloned();
        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(trigger.is_some());
        assert!(body.lines.is_empty());
        assert_eq!(body.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_summary_view() -> TestResult {
        let cart_uuid = CartUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_clear_cart()
            .once()
            .return_once(move |_| Ok(make_summary(cart_uuid, &[])));

        repo.expect_current_cart().never();

        let mut res = TestClient::post("http://example.com/store/clear?view=summary")
            .send(&make_service(repo))
            .await;

        let body: CartSummaryResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.units, 0);
        assert_eq!(body.total, 0);

        Ok(())
    }
}
