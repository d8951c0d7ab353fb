//! Loan Models

use std::{fmt, str::FromStr};

use jiff::{Timestamp, civil::Date};

use crate::{
    domain::{books::models::BookUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Book Copy UUID
pub type CopyUuid = TypedUuid<BookCopy>;

/// Where a physical copy currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    Available,
    OnLoan,
    Maintenance,
    Reserved,
}

impl CopyStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::OnLoan => "on_loan",
            Self::Maintenance => "maintenance",
            Self::Reserved => "reserved",
        }
    }
}

impl fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown copy status")]
pub struct UnknownCopyStatus;

impl FromStr for CopyStatus {
    type Err = UnknownCopyStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(Self::Available),
            "on_loan" => Ok(Self::OnLoan),
            "maintenance" => Ok(Self::Maintenance),
            "reserved" => Ok(Self::Reserved),
            _ => Err(UnknownCopyStatus),
        }
    }
}

/// Book Copy Model
#[derive(Debug, Clone)]
pub struct BookCopy {
    pub uuid: CopyUuid,
    pub book_uuid: BookUuid,
    pub imprint: String,
    pub status: CopyStatus,
    pub due_back: Option<Date>,
    pub borrower_uuid: Option<UserUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A copy on loan, joined with its book's title for listing.
#[derive(Debug, Clone)]
pub struct LoanedCopy {
    pub copy: BookCopy,
    pub title: String,
}
