//! Books service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::books::{
        errors::BooksServiceError,
        models::{Book, BookUpdate, BookUuid, NewBook},
        repository::PgBooksRepository,
    },
};

/// Listing page size, matching the catalog UI.
pub const BOOKS_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone)]
pub struct PgBooksService {
    db: Db,
    repository: PgBooksRepository,
}

impl PgBooksService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBooksRepository::new(),
        }
    }
}

#[async_trait]
impl BooksService for PgBooksService {
    async fn list_books(&self, page: u32) -> Result<Vec<Book>, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let offset = i64::from(page.saturating_sub(1)) * i64::from(BOOKS_PAGE_SIZE);

        let books = self
            .repository
            .list_books(&mut tx, i64::from(BOOKS_PAGE_SIZE), offset)
            .await?;

        tx.commit().await?;

        Ok(books)
    }

    async fn get_book(&self, book: BookUuid) -> Result<Book, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let book = self.repository.get_book(&mut tx, book).await?;

        tx.commit().await?;

        Ok(book)
    }

    async fn create_book(&self, book: NewBook) -> Result<Book, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_book(&mut tx, &book).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_book(
        &self,
        book: BookUuid,
        update: BookUpdate,
    ) -> Result<Book, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_book(&mut tx, book, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_book(&self, book: BookUuid) -> Result<(), BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_book(&mut tx, book).await?;

        if rows_affected == 0 {
            return Err(BooksServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait BooksService: Send + Sync {
    /// Retrieves a page of books ordered by title. Pages are 1-based.
    async fn list_books(&self, page: u32) -> Result<Vec<Book>, BooksServiceError>;

    /// Retrieve a single book.
    async fn get_book(&self, book: BookUuid) -> Result<Book, BooksServiceError>;

    /// Creates a new book with the given details.
    async fn create_book(&self, book: NewBook) -> Result<Book, BooksServiceError>;

    /// Replaces the book's details. Import metadata is left untouched.
    async fn update_book(
        &self,
        book: BookUuid,
        update: BookUpdate,
    ) -> Result<Book, BooksServiceError>;

    /// Deletes a book and its copies.
    async fn delete_book(&self, book: BookUuid) -> Result<(), BooksServiceError>;
}
