//! Books Repository

use serde_json::Value;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    books::models::{Book, BookUpdate, BookUuid, NewBook},
    rows::{try_get_timestamp, try_get_u32, try_get_u64},
};

const LIST_BOOKS_SQL: &str = include_str!("sql/list_books.sql");
const GET_BOOK_SQL: &str = include_str!("sql/get_book.sql");
const CREATE_BOOK_SQL: &str = include_str!("sql/create_book.sql");
const CREATE_BOOK_IF_NEW_SQL: &str = include_str!("sql/create_book_if_new.sql");
const UPDATE_BOOK_SQL: &str = include_str!("sql/update_book.sql");
const DELETE_BOOK_SQL: &str = include_str!("sql/delete_book.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBooksRepository;

impl PgBooksRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Book>, sqlx::Error> {
        query_as::<Postgres, Book>(LIST_BOOKS_SQL)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<Book, sqlx::Error> {
        query_as::<Postgres, Book>(GET_BOOK_SQL)
            .bind(book.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: &NewBook,
    ) -> Result<Book, sqlx::Error> {
        query_as::<Postgres, Book>(CREATE_BOOK_SQL)
            .bind(book.uuid.into_uuid())
            .bind(&book.title)
            .bind(book.author_uuid.into_uuid())
            .bind(&book.summary)
            .bind(&book.isbn)
            .bind(into_price_i64(book.price)?)
            .bind(i64::from(book.qty_on_hand))
            .bind(book.language.as_deref())
            .bind(&book.genres)
            .bind(&book.metadata)
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert a book, skipping silently when the ISBN is already present.
    /// Returns `None` when the row was skipped. Used by the CSV importer.
    pub(crate) async fn create_book_if_new(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: &NewBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        query_as::<Postgres, Book>(CREATE_BOOK_IF_NEW_SQL)
            .bind(book.uuid.into_uuid())
            .bind(&book.title)
            .bind(book.author_uuid.into_uuid())
            .bind(&book.summary)
            .bind(&book.isbn)
            .bind(into_price_i64(book.price)?)
            .bind(i64::from(book.qty_on_hand))
            .bind(book.language.as_deref())
            .bind(&book.genres)
            .bind(&book.metadata)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        update: &BookUpdate,
    ) -> Result<Book, sqlx::Error> {
        query_as::<Postgres, Book>(UPDATE_BOOK_SQL)
            .bind(book.into_uuid())
            .bind(&update.title)
            .bind(update.author_uuid.into_uuid())
            .bind(&update.summary)
            .bind(&update.isbn)
            .bind(into_price_i64(update.price)?)
            .bind(i64::from(update.qty_on_hand))
            .bind(update.language.as_deref())
            .bind(&update.genres)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_BOOK_SQL)
            .bind(book.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn into_price_i64(price: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(price).map_err(|e| sqlx::Error::ColumnDecode {
        index: "price".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Book {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: BookUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            author_uuid: row.try_get::<uuid::Uuid, _>("author_uuid")?.into(),
            summary: row.try_get("summary")?,
            isbn: row.try_get("isbn")?,
            price: try_get_u64(row, "price")?,
            qty_on_hand: try_get_u32(row, "qty_on_hand")?,
            language: row.try_get("language")?,
            genres: row.try_get("genres")?,
            metadata: row.try_get::<Value, _>("metadata")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
