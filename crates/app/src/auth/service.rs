//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{AuthUser, IssuedApiToken},
        repository::PgAuthRepository,
        token::{generate_api_token, hash_api_token},
    },
    database::Db,
    domain::users::models::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
        }
    }

    /// Issue a new bearer token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insertion fails.
    pub async fn issue_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let token = generate_api_token();
        let token_hash = hash_api_token(&token);

        let mut tx = self.db.begin().await?;

        self.repository
            .create_api_token(&mut tx, token_uuid, user, &token_hash)
            .await?;

        tx.commit().await?;

        tracing::info!(user_uuid = %user, %token_uuid, "issued api token");

        Ok(IssuedApiToken {
            uuid: token_uuid,
            token,
        })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<AuthUser, AuthServiceError> {
        let token_hash = hash_api_token(bearer_token);

        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_token_hash(&mut tx, &token_hash)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        // Best-effort usage timestamp; auth success does not depend on it.
        let _touch_result = self.repository.touch_api_token(&mut tx, &token_hash).await;

        tx.commit().await?;

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to its owning user.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<AuthUser, AuthServiceError>;
}
