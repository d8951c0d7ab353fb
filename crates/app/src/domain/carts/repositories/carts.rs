//! Carts Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    carts::models::{Cart, CartUuid},
    rows::try_get_timestamp,
    users::models::UserUuid,
};

const ENSURE_CART_SQL: &str = include_str!("../sql/ensure_cart.sql");
const GET_CART_SQL: &str = include_str!("../sql/get_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Fetch the owner's cart, creating it when absent.
    ///
    /// `carts.owner_uuid` is UNIQUE, so concurrent callers converge on the
    /// same row. The no-op `DO UPDATE` matters: unlike `DO NOTHING`, it lets
    /// the losing inserter see the winner's row, so `RETURNING` always yields
    /// exactly one cart.
    pub(crate) async fn ensure_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(ENSURE_CART_SQL)
            .bind(CartUuid::new().into_uuid())
            .bind(owner.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(GET_CART_SQL)
            .bind(cart.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            owner_uuid: UserUuid::from_uuid(row.try_get("owner_uuid")?),
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
