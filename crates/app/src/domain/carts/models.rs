//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::{books::models::BookUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Model
#[derive(Debug, Clone)]
pub struct Cart {
    pub uuid: CartUuid,
    pub owner_uuid: UserUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One line of a cart: a book, how many units of it, and when it first
/// entered the cart. Lines render in `added_at` order.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub book_uuid: BookUuid,
    pub title: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub added_at: Timestamp,
}

impl CartLine {
    /// `unit_price × quantity`, computed from the *current* stored price.
    /// Prices are never snapshotted at add time.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// A cart with its lines resolved for presentation.
#[derive(Debug, Clone)]
pub struct CartView {
    pub cart: Cart,
    pub lines: Vec<CartLine>,
}

impl CartView {
    /// Grand total over all line subtotals. Derived, never persisted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.subtotal()))
    }
}

/// Compact cart state for the "cart button" fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub cart_uuid: CartUuid,
    /// Number of distinct books in the cart.
    pub lines: u64,
    /// Total units across all lines.
    pub units: u64,
    /// Grand total in minor units.
    pub total: u64,
}

impl CartSummary {
    #[must_use]
    pub fn of(cart_uuid: CartUuid, lines: &[CartLine]) -> Self {
        Self {
            cart_uuid,
            lines: lines.len() as u64,
            units: lines
                .iter()
                .fold(0, |acc, line| acc.saturating_add(u64::from(line.quantity))),
            total: lines
                .iter()
                .fold(0, |acc, line| acc.saturating_add(line.subtotal())),
        }
    }
}

/// Result of a remove-item call.
///
/// Removing a book that is not in the cart is informational, not an error:
/// the cart is left untouched and the caller gets a message to surface.
#[derive(Debug, Clone)]
pub enum RemoveOutcome {
    Removed {
        title: String,
        summary: CartSummary,
    },
    NotInCart {
        title: String,
    },
}
