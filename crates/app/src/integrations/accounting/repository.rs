//! Accounting integration repository.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{domain::users::models::UserUuid, integrations::accounting::models::IntegrationTokens};

const BEGIN_HANDSHAKE_SQL: &str = include_str!("sql/begin_handshake.sql");
const GET_INTEGRATION_SQL: &str = include_str!("sql/get_integration.sql");
const STORE_TOKENS_SQL: &str = include_str!("sql/store_tokens.sql");
const DELETE_INTEGRATION_SQL: &str = include_str!("sql/delete_integration.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAccountingRepository;

impl PgAccountingRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Record a pending handshake, replacing any earlier state.
    pub(crate) async fn begin_handshake(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        service: &str,
        state: &str,
    ) -> Result<(), sqlx::Error> {
        query(BEGIN_HANDSHAKE_SQL)
            .bind(user.into_uuid())
            .bind(service)
            .bind(state)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_integration(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        service: &str,
    ) -> Result<Option<IntegrationTokens>, sqlx::Error> {
        query_as::<Postgres, IntegrationTokens>(GET_INTEGRATION_SQL)
            .bind(user.into_uuid())
            .bind(service)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn store_tokens(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        service: &str,
        access_token: &str,
        refresh_token: Option<&str>,
        expires_at: Option<Timestamp>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(STORE_TOKENS_SQL)
            .bind(user.into_uuid())
            .bind(service)
            .bind(access_token)
            .bind(refresh_token)
            .bind(expires_at.map(SqlxTimestamp::from))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_integration(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        service: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_INTEGRATION_SQL)
            .bind(user.into_uuid())
            .bind(service)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for IntegrationTokens {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            access_token: row.try_get("access_token")?,
            refresh_token: row.try_get("refresh_token")?,
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            oauth_state: row.try_get("oauth_state")?,
            connected_at: row
                .try_get::<Option<SqlxTimestamp>, _>("connected_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
