//! Stats Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{rows::try_get_u64, stats::models::CatalogStats};

const CATALOG_COUNTS_SQL: &str = include_str!("sql/catalog_counts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStatsRepository;

impl PgStatsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn catalog_counts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<CatalogStats, sqlx::Error> {
        query_as::<Postgres, CatalogStats>(CATALOG_COUNTS_SQL)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CatalogStats {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            books: try_get_u64(row, "books")?,
            copies: try_get_u64(row, "copies")?,
            copies_available: try_get_u64(row, "copies_available")?,
            authors: try_get_u64(row, "authors")?,
        })
    }
}
