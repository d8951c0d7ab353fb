//! Store Page Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    books::{errors::into_status_error as book_status_error, get::BookResponse},
    extensions::*,
    state::State,
    store::{
        CartResponse, CartSummaryResponse,
        errors::into_status_error,
    },
};

/// Store page with the full cart
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreResponse {
    /// The books on this catalog page
    pub books: Vec<BookResponse>,

    /// The 1-based page that was returned
    pub page: u32,

    pub cart: CartResponse,
}

/// Store page with the compact cart
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreSummaryResponse {
    /// The books on this catalog page
    pub books: Vec<BookResponse>,

    /// The 1-based page that was returned
    pub page: u32,

    pub cart: CartSummaryResponse,
}

/// Store Page Handler
///
/// The storefront: a catalog page plus the caller's current cart. The
/// cart is created on first visit.
#[endpoint(tags("store"), summary = "Store Page", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    view: QueryParam<String, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.auth_user_or_401()?;

    let view = view.into_view_mode()?;
    let page = page.into_inner().unwrap_or(1).max(1);

    let books = state
        .app
        .books
        .list_books(page)
        .await
        .map_err(book_status_error)?;

    let books = books.into_iter().map(Into::into).collect();

    match view {
        ViewMode::Full => {
            let cart = state
                .app
                .carts
                .current_cart(user.uuid)
                .await
                .map_err(into_status_error)?;

            res.render(Json(StoreResponse {
                books,
                page,
                cart: cart.into(),
            }));
        }
        ViewMode::Summary => {
            let summary = state
                .app
                .carts
                .cart_summary(user.uuid)
                .await
                .map_err(into_status_error)?;

            res.render(Json(StoreSummaryResponse {
                books,
                page,
                cart: summary.into(),
            }));
        }
    }

    Ok(())
}
