//! Loan Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use bibliotek_app::domain::loans::models::LoanedCopy;

pub(crate) mod borrowed;
pub(crate) mod mine;
pub(crate) mod renew;

/// A copy on loan, with its book's title
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoanedCopyResponse {
    /// The copy's unique identifier
    pub uuid: uuid::Uuid,

    /// The book's unique identifier
    pub book_uuid: uuid::Uuid,

    pub title: String,

    /// Publisher imprint of this physical copy
    pub imprint: String,

    /// Current copy status
    pub status: String,

    /// Due date, ISO 8601
    pub due_back: Option<String>,
}

impl From<LoanedCopy> for LoanedCopyResponse {
    fn from(loaned: LoanedCopy) -> Self {
        LoanedCopyResponse {
            uuid: loaned.copy.uuid.into(),
            book_uuid: loaned.copy.book_uuid.into(),
            title: loaned.title,
            imprint: loaned.copy.imprint,
            status: loaned.copy.status.to_string(),
            due_back: loaned.copy.due_back.as_ref().map(ToString::to_string),
        }
    }
}
