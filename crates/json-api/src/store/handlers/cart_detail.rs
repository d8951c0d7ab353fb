//! Cart Detail Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    store::{CartResponse, CartSummaryResponse, errors::into_status_error},
};

/// Cart Detail Handler
///
/// Loads a cart by identifier. Only the cart's owner may view it.
#[endpoint(
    tags("store"),
    summary = "Cart Detail",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The cart"),
        (status_code = StatusCode::FORBIDDEN, description = "Cart belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    view: QueryParam<String, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.auth_user_or_401()?;

    let view = view.into_view_mode()?;

    let cart = state
        .app
        .carts
        .cart_detail(user.uuid, cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    match view {
        ViewMode::Full => res.render(Json(CartResponse::from(cart))),
        ViewMode::Summary => res.render(Json(CartSummaryResponse::from(&cart))),
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

    use bibliotek_app::domain::carts::{CartsServiceError, MockCartsService, models::CartUuid};

    use crate::test_helpers::{
        TEST_USER_UUID, inject_member, make_cart_view, make_line, state_with_carts,
    };

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_carts(repo)))
                .hoop(inject_member)
                .push(Router::with_path("store/cart/{cart}").get(handler)),
        )
    }

    #[tokio::test]
    async fn test_cart_detail_lists_lines() -> TestResult {
        let cart_uuid = CartUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_cart_detail()
            .once()
            .withf(move |owner, cart| *owner == TEST_USER_UUID && *cart == cart_uuid)
            .return_once(move |owner, cart| {
                Ok(make_cart_view(
                    cart,
                    owner,
                    vec![make_line("Dune", 10_00, 2), make_line("Hobbit", 8_00, 1)],
                ))
            });

        let mut res = TestClient::get(format!("http://example.com/store/cart/{cart_uuid}"))
            .send(&make_service(repo))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.lines.len(), 2);
        assert_eq!(body.lines[0].subtotal, 20_00);
        assert_eq!(body.total, 28_00);

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_detail_of_another_users_cart_returns_403() -> TestResult {
        let cart_uuid = CartUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_cart_detail()
            .once()
            .return_once(|_, _| Err(CartsServiceError::Forbidden));

        let res = TestClient::get(format!("http://example.com/store/cart/{cart_uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_detail_of_missing_cart_returns_404() -> TestResult {
        let cart_uuid = CartUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_cart_detail()
            .once()
            .return_once(|_, _| Err(CartsServiceError::CartNotFound));

        let res = TestClient::get(format!("http://example.com/store/cart/{cart_uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
