//! Cart Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    books::models::BookUuid,
    carts::models::{CartLine, CartUuid},
    rows::{try_get_timestamp, try_get_u32, try_get_u64},
};

const GET_CART_LINES_SQL: &str = include_str!("../sql/get_cart_lines.sql");
const INCREMENT_ITEM_SQL: &str = include_str!("../sql/increment_item.sql");
const DELETE_ITEM_SQL: &str = include_str!("../sql/delete_item.sql");
const CLEAR_ITEMS_SQL: &str = include_str!("../sql/clear_items.sql");
const GET_BOOK_TITLE_SQL: &str = include_str!("../sql/get_book_title.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lines joined with their books, in the order titles first entered the
    /// cart.
    pub(crate) async fn get_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(GET_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Add one unit of the book, inserting the line when absent.
    ///
    /// The increment happens inside a single statement so two concurrent
    /// adds both land instead of the last writer winning.
    pub(crate) async fn increment_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        book: BookUuid,
    ) -> Result<u32, sqlx::Error> {
        let (quantity,): (i32,) = query_as(INCREMENT_ITEM_SQL)
            .bind(cart.into_uuid())
            .bind(book.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })
    }

    /// Drop the book's line entirely, whatever its quantity.
    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        book: BookUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ITEM_SQL)
            .bind(cart.into_uuid())
            .bind(book.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_ITEMS_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Resolve a book's title, or `None` when the book does not exist.
    pub(crate) async fn get_book_title(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = query_as(GET_BOOK_TITLE_SQL)
            .bind(book.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(|(title,)| title))
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            book_uuid: BookUuid::from_uuid(row.try_get("book_uuid")?),
            title: row.try_get("title")?,
            unit_price: try_get_u64(row, "unit_price")?,
            quantity: try_get_u32(row, "quantity")?,
            added_at: try_get_timestamp(row, "added_at")?,
        })
    }
}
