//! Auth repository.

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    auth::models::AuthUser,
    domain::users::models::{UserRole, UserUuid},
};

const FIND_USER_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_user_by_token_hash.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const TOUCH_API_TOKEN_SQL: &str = include_str!("sql/touch_api_token.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_user_by_token_hash(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_hash: &str,
    ) -> Result<Option<AuthUser>, sqlx::Error> {
        query_as::<Postgres, AuthUser>(FIND_USER_BY_TOKEN_HASH_SQL)
            .bind(token_hash)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_api_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_uuid: Uuid,
        user: UserUuid,
        token_hash: &str,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_API_TOKEN_SQL)
            .bind(token_uuid)
            .bind(user.into_uuid())
            .bind(token_hash)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn touch_api_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_hash: &str,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_API_TOKEN_SQL)
            .bind(token_hash)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for AuthUser {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            role: role
                .parse::<UserRole>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "role".to_string(),
                    source: Box::new(e),
                })?,
        })
    }
}
