//! Auth data models.

use uuid::Uuid;

use crate::domain::users::models::{UserRole, UserUuid};

/// The user behind an authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub uuid: UserUuid,
    pub role: UserRole,
}

/// Token issuance result with the one-time raw token.
///
/// The raw token is shown exactly once; afterwards only its hash exists.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub uuid: Uuid,
    pub token: String,
}
