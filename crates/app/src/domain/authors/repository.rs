//! Authors Repository

use jiff_sqlx::Date as SqlxDate;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    authors::models::{Author, AuthorUpdate, AuthorUuid, NewAuthor},
    rows::try_get_timestamp,
};

const LIST_AUTHORS_SQL: &str = include_str!("sql/list_authors.sql");
const GET_AUTHOR_SQL: &str = include_str!("sql/get_author.sql");
const CREATE_AUTHOR_SQL: &str = include_str!("sql/create_author.sql");
const UPDATE_AUTHOR_SQL: &str = include_str!("sql/update_author.sql");
const DELETE_AUTHOR_SQL: &str = include_str!("sql/delete_author.sql");
const FIND_AUTHOR_BY_NAME_SQL: &str = include_str!("sql/find_author_by_name.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthorsRepository;

impl PgAuthorsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_authors(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Author>, sqlx::Error> {
        query_as::<Postgres, Author>(LIST_AUTHORS_SQL)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_author(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        author: AuthorUuid,
    ) -> Result<Author, sqlx::Error> {
        query_as::<Postgres, Author>(GET_AUTHOR_SQL)
            .bind(author.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_author(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        author: &NewAuthor,
    ) -> Result<Author, sqlx::Error> {
        query_as::<Postgres, Author>(CREATE_AUTHOR_SQL)
            .bind(author.uuid.into_uuid())
            .bind(&author.first_name)
            .bind(&author.last_name)
            .bind(author.date_of_birth.map(SqlxDate::from))
            .bind(author.date_of_death.map(SqlxDate::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_author(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        author: AuthorUuid,
        update: &AuthorUpdate,
    ) -> Result<Author, sqlx::Error> {
        query_as::<Postgres, Author>(UPDATE_AUTHOR_SQL)
            .bind(author.into_uuid())
            .bind(&update.first_name)
            .bind(&update.last_name)
            .bind(update.date_of_birth.map(SqlxDate::from))
            .bind(update.date_of_death.map(SqlxDate::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_author(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        author: AuthorUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_AUTHOR_SQL)
            .bind(author.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Look up an author by exact name; used by the CSV importer.
    pub(crate) async fn find_author_by_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Author>, sqlx::Error> {
        query_as::<Postgres, Author>(FIND_AUTHOR_BY_NAME_SQL)
            .bind(first_name)
            .bind(last_name)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Author {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AuthorUuid::from_uuid(row.try_get("uuid")?),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            date_of_birth: row
                .try_get::<Option<SqlxDate>, _>("date_of_birth")?
                .map(SqlxDate::to_jiff),
            date_of_death: row
                .try_get::<Option<SqlxDate>, _>("date_of_death")?
                .map(SqlxDate::to_jiff),
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
