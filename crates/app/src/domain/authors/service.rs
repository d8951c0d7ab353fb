//! Authors service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::authors::{
        errors::AuthorsServiceError,
        models::{Author, AuthorUpdate, AuthorUuid, NewAuthor},
        repository::PgAuthorsRepository,
    },
};

/// Listing page size, matching the catalog UI.
pub const AUTHORS_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone)]
pub struct PgAuthorsService {
    db: Db,
    repository: PgAuthorsRepository,
}

impl PgAuthorsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuthorsRepository::new(),
        }
    }
}

#[async_trait]
impl AuthorsService for PgAuthorsService {
    async fn list_authors(&self, page: u32) -> Result<Vec<Author>, AuthorsServiceError> {
        let mut tx = self.db.begin().await?;

        let offset = i64::from(page.saturating_sub(1)) * i64::from(AUTHORS_PAGE_SIZE);

        let authors = self
            .repository
            .list_authors(&mut tx, i64::from(AUTHORS_PAGE_SIZE), offset)
            .await?;

        tx.commit().await?;

        Ok(authors)
    }

    async fn get_author(&self, author: AuthorUuid) -> Result<Author, AuthorsServiceError> {
        let mut tx = self.db.begin().await?;

        let author = self.repository.get_author(&mut tx, author).await?;

        tx.commit().await?;

        Ok(author)
    }

    async fn create_author(&self, author: NewAuthor) -> Result<Author, AuthorsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_author(&mut tx, &author).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_author(
        &self,
        author: AuthorUuid,
        update: AuthorUpdate,
    ) -> Result<Author, AuthorsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_author(&mut tx, author, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_author(&self, author: AuthorUuid) -> Result<(), AuthorsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_author(&mut tx, author).await?;

        if rows_affected == 0 {
            return Err(AuthorsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthorsService: Send + Sync {
    /// Retrieves a page of authors ordered by name. Pages are 1-based.
    async fn list_authors(&self, page: u32) -> Result<Vec<Author>, AuthorsServiceError>;

    /// Retrieve a single author.
    async fn get_author(&self, author: AuthorUuid) -> Result<Author, AuthorsServiceError>;

    /// Creates a new author with the given details.
    async fn create_author(&self, author: NewAuthor) -> Result<Author, AuthorsServiceError>;

    /// Replaces the author's details.
    async fn update_author(
        &self,
        author: AuthorUuid,
        update: AuthorUpdate,
    ) -> Result<Author, AuthorsServiceError>;

    /// Deletes an author. Fails with [`AuthorsServiceError::StillReferenced`]
    /// when books still point at them.
    async fn delete_author(&self, author: AuthorUuid) -> Result<(), AuthorsServiceError>;
}
