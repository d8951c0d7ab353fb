//! Users Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    rows::{try_get_timestamp, try_get_u64},
    users::models::{NewUser, User, UserRole, UserUuid},
};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const RECORD_VISIT_SQL: &str = include_str!("sql/record_visit.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Increment the user's visit counter and return the new count.
    pub(crate) async fn record_visit(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let (visits,): (i64,) = query_as(RECORD_VISIT_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(visits).map_err(|e| sqlx::Error::ColumnDecode {
            index: "visits".to_string(),
            source: Box::new(e),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;
        let role = role.parse::<UserRole>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role,
            visits: try_get_u64(row, "visits")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
