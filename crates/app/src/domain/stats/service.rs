//! Stats service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::stats::{errors::StatsServiceError, models::CatalogStats, repository::PgStatsRepository},
};

#[derive(Debug, Clone)]
pub struct PgStatsService {
    db: Db,
    repository: PgStatsRepository,
}

impl PgStatsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStatsRepository::new(),
        }
    }
}

#[async_trait]
impl StatsService for PgStatsService {
    async fn catalog_stats(&self) -> Result<CatalogStats, StatsServiceError> {
        let mut tx = self.db.begin().await?;

        let stats = self.repository.catalog_counts(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Headline catalog counts for the home page.
    async fn catalog_stats(&self) -> Result<CatalogStats, StatsServiceError>;
}
