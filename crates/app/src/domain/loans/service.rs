//! Loans service.

use async_trait::async_trait;
use jiff::{Span, Zoned, civil::Date};
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        loans::{
            errors::LoansServiceError,
            models::{BookCopy, CopyUuid, LoanedCopy},
            repository::PgLoansRepository,
        },
        users::models::UserUuid,
    },
};

/// Default renewal period when the librarian does not pick a date.
pub const DEFAULT_RENEWAL_DAYS: i64 = 21;

/// Renewals cannot reach further than this.
pub const MAX_RENEWAL_DAYS: i64 = 28;

/// The renewal date a renewal form should propose: three weeks from today.
#[must_use]
pub fn proposed_renewal_date(today: Date) -> Date {
    today
        .checked_add(Span::new().days(DEFAULT_RENEWAL_DAYS))
        .unwrap_or(today)
}

/// Check a requested renewal date against today: not in the past, at most
/// four weeks ahead.
pub fn validate_renewal_date(today: Date, due_back: Date) -> Result<(), LoansServiceError> {
    if due_back < today {
        return Err(LoansServiceError::DueDateInPast);
    }

    let horizon = today
        .checked_add(Span::new().days(MAX_RENEWAL_DAYS))
        .unwrap_or(today);

    if due_back > horizon {
        return Err(LoansServiceError::DueDateTooFar);
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct PgLoansService {
    db: Db,
    repository: PgLoansRepository,
}

impl PgLoansService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgLoansRepository::new(),
        }
    }
}

#[async_trait]
impl LoansService for PgLoansService {
    async fn list_borrowed_by(
        &self,
        borrower: UserUuid,
    ) -> Result<Vec<LoanedCopy>, LoansServiceError> {
        let mut tx = self.db.begin().await?;

        let copies = self.repository.list_borrowed_by(&mut tx, borrower).await?;

        tx.commit().await?;

        Ok(copies)
    }

    async fn list_all_on_loan(&self) -> Result<Vec<LoanedCopy>, LoansServiceError> {
        let mut tx = self.db.begin().await?;

        let copies = self.repository.list_all_on_loan(&mut tx).await?;

        tx.commit().await?;

        Ok(copies)
    }

    async fn renew_copy(
        &self,
        copy: CopyUuid,
        due_back: Option<Date>,
    ) -> Result<BookCopy, LoansServiceError> {
        let today = Zoned::now().date();
        let due_back = due_back.unwrap_or_else(|| proposed_renewal_date(today));

        validate_renewal_date(today, due_back)?;

        let mut tx = self.db.begin().await?;

        let renewed = self.repository.renew_copy(&mut tx, copy, due_back).await?;

        tx.commit().await?;

        tracing::info!(copy_uuid = %copy, due_back = %due_back, "renewed book copy");

        Ok(renewed)
    }
}

#[automock]
#[async_trait]
pub trait LoansService: Send + Sync {
    /// Copies currently on loan to the given user, soonest due first.
    async fn list_borrowed_by(
        &self,
        borrower: UserUuid,
    ) -> Result<Vec<LoanedCopy>, LoansServiceError>;

    /// All copies on loan across the library, soonest due first.
    async fn list_all_on_loan(&self) -> Result<Vec<LoanedCopy>, LoansServiceError>;

    /// Push a copy's due date out. `None` picks the default three-week
    /// renewal; dates in the past or more than four weeks out are rejected.
    async fn renew_copy(
        &self,
        copy: CopyUuid,
        due_back: Option<Date>,
    ) -> Result<BookCopy, LoansServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn proposed_date_is_three_weeks_out() {
        let today = date(2026, 8, 1);

        assert_eq!(proposed_renewal_date(today), date(2026, 8, 22));
    }

    #[test]
    fn today_is_a_valid_renewal_date() {
        let today = date(2026, 8, 1);

        assert!(validate_renewal_date(today, today).is_ok());
    }

    #[test]
    fn four_weeks_out_is_the_limit() {
        let today = date(2026, 8, 1);

        assert!(validate_renewal_date(today, date(2026, 8, 29)).is_ok());
        assert!(matches!(
            validate_renewal_date(today, date(2026, 8, 30)),
            Err(LoansServiceError::DueDateTooFar)
        ));
    }

    #[test]
    fn yesterday_is_rejected() {
        let today = date(2026, 8, 1);

        assert!(matches!(
            validate_renewal_date(today, date(2026, 7, 31)),
            Err(LoansServiceError::DueDateInPast)
        ));
    }
}
