//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bibliotek_app::domain::carts::models::RemoveOutcome;

use crate::{
    extensions::*,
    state::State,
    store::{CartResponse, CartSummaryResponse, errors::into_status_error, notify_cart_updated},
};

/// Remove Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveItemResponse {
    /// Whether any units were actually removed
    pub removed: bool,

    /// Human-readable outcome for the caller to surface
    pub message: String,

    /// Cart state after the call; absent when nothing changed
    pub cart: Option<CartResponse>,
}

/// Remove Cart Item Response, compact view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveItemSummaryResponse {
    /// Whether any units were actually removed
    pub removed: bool,

    /// Human-readable outcome for the caller to surface
    pub message: String,

    /// Cart state after the call; absent when nothing changed
    pub cart: Option<CartSummaryResponse>,
}

/// Remove Cart Item Handler
///
/// Removes every unit of a book from the caller's cart. Removing a book
/// that is not in the cart is informational: 200, `removed: false`, and
/// no change-notification header.
#[endpoint(
    tags("store"),
    summary = "Remove Item from Cart",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    view: QueryParam<String, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.auth_user_or_401()?;

    let view = view.into_view_mode()?;

    let outcome = state
        .app
        .carts
        .remove_item(user.uuid, book.into_inner().into())
        .await
        .map_err(into_status_error)?;

    match outcome {
        RemoveOutcome::Removed { title, summary } => {
            notify_cart_updated(res);

            let message = format!("Removed \"{title}\" from your cart");

            match view {
                ViewMode::Summary => res.render(Json(RemoveItemSummaryResponse {
                    removed: true,
                    message,
                    cart: Some(summary.into()),
                })),
                ViewMode::Full => {
                    let cart = state
                        .app
                        .carts
                        .current_cart(user.uuid)
                        .await
                        .map_err(into_status_error)?;

                    res.render(Json(RemoveItemResponse {
                        removed: true,
                        message,
                        cart: Some(cart.into()),
                    }));
                }
            }
        }
        RemoveOutcome::NotInCart { title } => {
            let message = format!("\"{title}\" is not in your cart");

            match view {
                ViewMode::Summary => res.render(Json(RemoveItemSummaryResponse {
                    removed: false,
                    message,
                    cart: None,
                })),
                ViewMode::Full => res.render(Json(RemoveItemResponse {
                    removed: false,
                    message,
                    cart: None,
                })),
            }
        }
    }

    Ok(())
}
