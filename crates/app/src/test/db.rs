//! Per-test PostgreSQL databases inside a shared container.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool, Postgres, Transaction};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::OnceCell;

const DB_USER: &str = "bibliotek_test";
const DB_PASSWORD: &str = "bibliotek_test_password";

/// One container for the whole test binary. Each test carves its own
/// database out of it, so parallel tests never share state.
static CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

async fn start_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(DB_USER)
        .with_password(DB_PASSWORD)
        .with_db_name("bibliotek_test")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("failed to start postgres container")
}

fn container_host() -> String {
    // Needed when the tests themselves run inside a container and
    // "localhost" is not where the docker daemon publishes ports.
    std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string())
}

/// A freshly created database with the workspace migrations applied.
///
/// Isolation is database-level: services commit real transactions, and clean
/// state comes from every test getting its own database rather than from any
/// rollback trickery. Databases are discarded with the container at the end
/// of the run.
pub struct TestDb {
    pool: PgPool,
}

impl TestDb {
    pub async fn new() -> Self {
        let container = CONTAINER.get_or_init(start_container).await;

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("failed to resolve container port");

        let host = container_host();

        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system clock before unix epoch")
            .as_nanos();

        let thread = std::thread::current().id();
        let name = format!("bibliotek_test_{nanos}_{thread:?}").replace([':', ' ', '(', ')'], "");

        let admin_url = format!("postgresql://{DB_USER}:{DB_PASSWORD}@{host}:{port}/postgres");

        let mut admin = PgConnection::connect(&admin_url)
            .await
            .expect("failed to connect to the maintenance database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut admin)
            .await
            .expect("failed to create test database");

        admin
            .close()
            .await
            .expect("failed to close maintenance connection");

        let url = format!("postgresql://{DB_USER}:{DB_PASSWORD}@{host}:{port}/{name}");

        let pool = PgPool::connect(&url)
            .await
            .expect("failed to connect to test database");

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .expect("failed to run migrations");

        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// A transaction that rolls back when dropped. Repository tests use this
    /// to exercise SQL without committing anything.
    pub async fn begin_test_transaction(&self) -> Transaction<'_, Postgres> {
        self.pool
            .begin()
            .await
            .expect("failed to begin test transaction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_databases_are_isolated() {
        let first = TestDb::new().await;
        let second = TestDb::new().await;

        sqlx::query("INSERT INTO authors (uuid, first_name, last_name) VALUES ($1, 'Frank', 'Herbert')")
            .bind(uuid::Uuid::now_v7())
            .execute(first.pool())
            .await
            .expect("failed to insert author");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(second.pool())
            .await
            .expect("failed to count authors");

        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_transaction_rolls_back_on_drop() {
        let test_db = TestDb::new().await;

        {
            let mut tx = test_db.begin_test_transaction().await;

            sqlx::query("INSERT INTO authors (uuid, first_name, last_name) VALUES ($1, 'Ursula', 'Le Guin')")
                .bind(uuid::Uuid::now_v7())
                .execute(&mut *tx)
                .await
                .expect("failed to insert author");
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(test_db.pool())
            .await
            .expect("failed to count authors");

        assert_eq!(count, 0);
    }
}
