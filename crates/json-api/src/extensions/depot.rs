//! Depot helper extensions.

use std::any::Any;

use bibliotek_app::{auth::AuthUser, domain::users::models::UserRole};
use salvo::prelude::{Depot, StatusError};

const AUTH_USER_KEY: &str = "auth_user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the authenticated user; done once by the auth middleware.
    fn insert_auth_user(&mut self, user: AuthUser);

    fn auth_user_or_401(&self) -> Result<AuthUser, StatusError>;

    /// The authenticated user, who must be a librarian.
    fn librarian_or_403(&self) -> Result<AuthUser, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_auth_user(&mut self, user: AuthUser) {
        self.insert(AUTH_USER_KEY, user);
    }

    fn auth_user_or_401(&self) -> Result<AuthUser, StatusError> {
        self.get::<AuthUser>(AUTH_USER_KEY)
            .copied()
            .map_err(|_missing| StatusError::unauthorized())
    }

    fn librarian_or_403(&self) -> Result<AuthUser, StatusError> {
        let user = self.auth_user_or_401()?;

        if user.role != UserRole::Librarian {
            return Err(StatusError::forbidden().brief("Librarian role required"));
        }

        Ok(user)
    }
}
