//! Loans Repository

use jiff_sqlx::Date as SqlxDate;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    loans::models::{BookCopy, CopyStatus, CopyUuid, LoanedCopy},
    rows::try_get_timestamp,
    users::models::UserUuid,
};

const LIST_BORROWED_BY_SQL: &str = include_str!("sql/list_borrowed_by.sql");
const LIST_ALL_ON_LOAN_SQL: &str = include_str!("sql/list_all_on_loan.sql");
const RENEW_COPY_SQL: &str = include_str!("sql/renew_copy.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgLoansRepository;

impl PgLoansRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_borrowed_by(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        borrower: UserUuid,
    ) -> Result<Vec<LoanedCopy>, sqlx::Error> {
        query_as::<Postgres, LoanedCopy>(LIST_BORROWED_BY_SQL)
            .bind(borrower.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_all_on_loan(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<LoanedCopy>, sqlx::Error> {
        query_as::<Postgres, LoanedCopy>(LIST_ALL_ON_LOAN_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn renew_copy(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        copy: CopyUuid,
        due_back: jiff::civil::Date,
    ) -> Result<BookCopy, sqlx::Error> {
        query_as::<Postgres, BookCopy>(RENEW_COPY_SQL)
            .bind(copy.into_uuid())
            .bind(SqlxDate::from(due_back))
            .fetch_one(&mut **tx)
            .await
    }
}

fn copy_from_row(row: &PgRow) -> sqlx::Result<BookCopy> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<CopyStatus>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: Box::new(e),
        })?;

    Ok(BookCopy {
        uuid: CopyUuid::from_uuid(row.try_get("uuid")?),
        book_uuid: row.try_get::<Uuid, _>("book_uuid")?.into(),
        imprint: row.try_get("imprint")?,
        status,
        due_back: row
            .try_get::<Option<SqlxDate>, _>("due_back")?
            .map(SqlxDate::to_jiff),
        borrower_uuid: row
            .try_get::<Option<Uuid>, _>("borrower_uuid")?
            .map(UserUuid::from_uuid),
        created_at: try_get_timestamp(row, "created_at")?,
        updated_at: try_get_timestamp(row, "updated_at")?,
    })
}

impl<'r> FromRow<'r, PgRow> for BookCopy {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        copy_from_row(row)
    }
}

impl<'r> FromRow<'r, PgRow> for LoanedCopy {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            copy: copy_from_row(row)?,
            title: row.try_get("title")?,
        })
    }
}
