//! User Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// What a user is allowed to do.
///
/// Librarians manage the catalog and loans; members browse and shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Member,
    Librarian,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Librarian => "librarian",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown user role")]
pub struct UnknownRole;

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "member" => Ok(Self::Member),
            "librarian" => Ok(Self::Librarian),
            _ => Err(UnknownRole),
        }
    }
}

/// User Model
#[derive(Debug, Clone)]
pub struct User {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub visits: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New User Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [UserRole::Member, UserRole::Librarian] {
            assert_eq!(role.as_str().parse::<UserRole>(), Ok(role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_eq!("admin".parse::<UserRole>(), Err(UnknownRole));
    }
}
