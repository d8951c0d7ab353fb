//! Store Handlers

use salvo::{http::HeaderValue, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bibliotek_app::domain::carts::models::{CartLine, CartSummary, CartView};

pub(crate) mod add_item;
pub(crate) mod cart_detail;
pub(crate) mod clear;
pub(crate) mod index;
pub(crate) mod remove_item;

/// Incremental UIs listen for this header to refresh cart fragments.
/// Every successful cart mutation sets it; informational no-ops do not.
pub(crate) const CART_UPDATED_TRIGGER: &str = "cart_updated";

pub(crate) fn notify_cart_updated(res: &mut Response) {
    res.headers_mut()
        .insert("hx-trigger", HeaderValue::from_static(CART_UPDATED_TRIGGER));
}

/// One cart line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// The book's unique identifier
    pub book_uuid: Uuid,

    pub title: String,

    /// Current catalog price in minor units
    pub unit_price: u64,

    pub quantity: u32,

    /// `unit_price × quantity`
    pub subtotal: u64,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        CartLineResponse {
            book_uuid: line.book_uuid.into(),
            subtotal: line.subtotal(),
            title: line.title,
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// Full cart detail
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The cart's unique identifier
    pub uuid: Uuid,

    /// The owning user's unique identifier
    pub owner_uuid: Uuid,

    /// Lines in the order their books first entered the cart
    pub lines: Vec<CartLineResponse>,

    /// Grand total in minor units
    pub total: u64,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        CartResponse {
            uuid: view.cart.uuid.into(),
            owner_uuid: view.cart.owner_uuid.into(),
            total: view.total(),
            lines: view.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Compact cart state for the cart-button fragment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartSummaryResponse {
    /// The cart's unique identifier
    pub cart_uuid: Uuid,

    /// Distinct books in the cart
    pub lines: u64,

    /// Total units across all lines
    pub units: u64,

    /// Grand total in minor units
    pub total: u64,
}

impl From<CartSummary> for CartSummaryResponse {
    fn from(summary: CartSummary) -> Self {
        CartSummaryResponse {
            cart_uuid: summary.cart_uuid.into(),
            lines: summary.lines,
            units: summary.units,
            total: summary.total,
        }
    }
}

impl From<&CartView> for CartSummaryResponse {
    fn from(view: &CartView) -> Self {
        CartSummary::of(view.cart.uuid, &view.lines).into()
    }
}
