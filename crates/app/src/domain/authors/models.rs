//! Author Models

use jiff::{Timestamp, civil::Date};

use crate::uuids::TypedUuid;

/// Author UUID
pub type AuthorUuid = TypedUuid<Author>;

/// Author Model
#[derive(Debug, Clone)]
pub struct Author {
    pub uuid: AuthorUuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<Date>,
    pub date_of_death: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Author Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuthor {
    pub uuid: AuthorUuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<Date>,
    pub date_of_death: Option<Date>,
}

/// Author Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorUpdate {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<Date>,
    pub date_of_death: Option<Date>,
}
