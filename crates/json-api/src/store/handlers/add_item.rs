//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    store::{CartResponse, CartSummaryResponse, errors::into_status_error, notify_cart_updated},
};

/// Add Cart Item Handler
///
/// Adds one unit of a book to the caller's cart, creating the cart if
/// needed. `go_to_cart=true` redirects to the cart detail instead of
/// returning a payload.
#[endpoint(
    tags("store"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::SEE_OTHER, description = "Item added, redirecting to the cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    go_to_cart: QueryParam<bool, false>,
    view: QueryParam<String, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.auth_user_or_401()?;

    let view = view.into_view_mode()?;
    let go_to_cart = go_to_cart.into_inner().unwrap_or(false);

    let summary = state
        .app
        .carts
        .add_item(user.uuid, book.into_inner().into())
        .await
        .map_err(into_status_error)?;

    notify_cart_updated(res);

    if go_to_cart {
        let cart_uuid = summary.cart_uuid;

        res.add_header(LOCATION, format!("/store/cart/{cart_uuid}"), true)
            .or_500("failed to set location header")?
            .status_code(StatusCode::SEE_OTHER);

        return Ok(());
    }

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
