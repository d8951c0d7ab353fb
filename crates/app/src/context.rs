//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        authors::{AuthorsService, PgAuthorsService},
        books::{BooksService, PgBooksService},
        carts::{CartsService, PgCartsService},
        imports::{ImportsService, PgImportsService},
        loans::{LoansService, PgLoansService},
        stats::{PgStatsService, StatsService},
        users::{PgUsersService, UsersService},
    },
    integrations::accounting::{AccountingClient, AccountingService, PgAccountingService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub authors: Arc<dyn AuthorsService>,
    pub books: Arc<dyn BooksService>,
    pub carts: Arc<dyn CartsService>,
    pub imports: Arc<dyn ImportsService>,
    pub loans: Arc<dyn LoansService>,
    pub stats: Arc<dyn StatsService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
    pub accounting: Arc<dyn AccountingService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        accounting_client: AccountingClient,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            authors: Arc::new(PgAuthorsService::new(db.clone())),
            books: Arc::new(PgBooksService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            imports: Arc::new(PgImportsService::new(db.clone())),
            loans: Arc::new(PgLoansService::new(db.clone())),
            stats: Arc::new(PgStatsService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db.clone())),
            accounting: Arc::new(PgAccountingService::new(db, accounting_client)),
        })
    }
}
