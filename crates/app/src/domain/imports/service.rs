//! Imports service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

use crate::{
    database::Db,
    domain::{
        authors::{
            PgAuthorsRepository,
            models::{AuthorUuid, NewAuthor},
        },
        books::{
            PgBooksRepository,
            models::{BookUuid, NewBook},
        },
        imports::{
            errors::ImportsServiceError,
            models::{ImportReport, SkippedRow},
            parser::parse_catalog_csv,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgImportsService {
    db: Db,
    authors_repository: PgAuthorsRepository,
    books_repository: PgBooksRepository,
}

impl PgImportsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            authors_repository: PgAuthorsRepository::new(),
            books_repository: PgBooksRepository::new(),
        }
    }
}

#[async_trait]
impl ImportsService for PgImportsService {
    async fn import_books(&self, csv: &[u8]) -> Result<ImportReport, ImportsServiceError> {
        let (rows, mut skipped) = parse_catalog_csv(csv)?;

        let mut tx = self.db.begin().await?;

        let mut report = ImportReport::default();
        // Authors resolved so far in this run, keyed by (first, last).
        let mut known_authors: HashMap<(String, String), AuthorUuid> = HashMap::new();

        for (line, row) in rows {
            let author_key = (row.author_first_name.clone(), row.author_last_name.clone());

            let author_uuid = match known_authors.get(&author_key) {
                Some(uuid) => *uuid,
                None => {
                    let existing = self
                        .authors_repository
                        .find_author_by_name(&mut tx, &row.author_first_name, &row.author_last_name)
                        .await?;

                    let uuid = match existing {
                        Some(author) => author.uuid,
                        None => {
                            let author = self
                                .authors_repository
                                .create_author(
                                    &mut tx,
                                    &NewAuthor {
                                        uuid: AuthorUuid::new(),
                                        first_name: row.author_first_name.clone(),
                                        last_name: row.author_last_name.clone(),
                                        date_of_birth: None,
                                        date_of_death: None,
                                    },
                                )
                                .await?;

                            report.authors_created += 1;

                            author.uuid
                        }
                    };

                    known_authors.insert(author_key, uuid);

                    uuid
                }
            };

            let book = NewBook {
                uuid: BookUuid::new(),
                title: row.title,
                author_uuid,
                summary: row.summary,
                isbn: row.isbn,
                price: row.price,
                qty_on_hand: row.qty_on_hand,
                language: row.language,
                genres: row.genres,
                metadata: Value::Object(row.metadata),
            };

            match self.books_repository.create_book_if_new(&mut tx, &book).await? {
                Some(_created) => report.created += 1,
                None => skipped.push(SkippedRow {
                    line,
                    reason: format!("duplicate isbn {:?}", book.isbn),
                }),
            }
        }

        tx.commit().await?;

        skipped.sort_by_key(|row| row.line);
        report.skipped = skipped;

        tracing::info!(
            created = report.created,
            authors_created = report.authors_created,
            skipped = report.skipped.len(),
            "catalog import finished"
        );

        Ok(report)
    }
}

#[automock]
#[async_trait]
pub trait ImportsService: Send + Sync {
    /// Import a catalog CSV in one transaction.
    ///
    /// Rows that cannot be parsed, or whose ISBN already exists, are
    /// reported as skipped; they never fail the import. Authors are matched
    /// by exact name and created when missing.
    async fn import_books(&self, csv: &[u8]) -> Result<ImportReport, ImportsServiceError>;
}
