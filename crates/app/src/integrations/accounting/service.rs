//! Accounting service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use rand::{RngCore, rngs::OsRng};

use crate::{
    auth::encode_hex,
    database::Db,
    domain::users::models::UserUuid,
    integrations::accounting::{
        client::AccountingClient,
        errors::AccountingServiceError,
        models::ConnectionStatus,
        repository::PgAccountingRepository,
    },
};

/// The `service` column value for this integration.
pub const ACCOUNTING_SERVICE: &str = "accounting";

const OAUTH_STATE_BYTES: usize = 16;

#[derive(Debug, Clone)]
pub struct PgAccountingService {
    db: Db,
    repository: PgAccountingRepository,
    client: AccountingClient,
}

impl PgAccountingService {
    #[must_use]
    pub fn new(db: Db, client: AccountingClient) -> Self {
        Self {
            db,
            repository: PgAccountingRepository::new(),
            client,
        }
    }
}

#[async_trait]
impl AccountingService for PgAccountingService {
    async fn connection_status(
        &self,
        user: UserUuid,
    ) -> Result<ConnectionStatus, AccountingServiceError> {
        let mut tx = self.db.begin().await?;

        let integration = self
            .repository
            .get_integration(&mut tx, user, ACCOUNTING_SERVICE)
            .await?;

        tx.commit().await?;

        let connected_at = integration.and_then(|row| row.connected_at);

        Ok(ConnectionStatus {
            connected: connected_at.is_some(),
            connected_at,
        })
    }

    async fn begin_connect(&self, user: UserUuid) -> Result<String, AccountingServiceError> {
        let mut state_bytes = [0_u8; OAUTH_STATE_BYTES];

        OsRng.fill_bytes(&mut state_bytes);

        let state = encode_hex(&state_bytes);

        let mut tx = self.db.begin().await?;

        self.repository
            .begin_handshake(&mut tx, user, ACCOUNTING_SERVICE, &state)
            .await?;

        tx.commit().await?;

        tracing::debug!(user_uuid = %user, "started accounting oauth handshake");

        Ok(self.client.authorize_url(&state))
    }

    async fn complete_connect(
        &self,
        user: UserUuid,
        code: &str,
        state: &str,
    ) -> Result<(), AccountingServiceError> {
        let mut tx = self.db.begin().await?;

        let pending_state = self
            .repository
            .get_integration(&mut tx, user, ACCOUNTING_SERVICE)
            .await?
            .and_then(|row| row.oauth_state);

        tx.commit().await?;

        // The state must match what we handed to the provider earlier.
        if pending_state.as_deref() != Some(state) {
            return Err(AccountingServiceError::StateMismatch);
        }

        // The code exchange goes out over the network. No transaction may be
        // open while we wait on the provider, or a slow provider pins a
        // pooled connection.
        let tokens = self.client.exchange_code(code).await?;

        let expires_at = tokens.expires_in.and_then(|seconds| {
            Timestamp::now()
                .checked_add(SignedDuration::from_secs(seconds))
                .ok()
        });

        let mut tx = self.db.begin().await?;

        self.repository
            .store_tokens(
                &mut tx,
                user,
                ACCOUNTING_SERVICE,
                &tokens.access_token,
                tokens.refresh_token.as_deref(),
                expires_at,
            )
            .await?;

        tx.commit().await?;

        tracing::info!(user_uuid = %user, "accounting service connected");

        Ok(())
    }

    async fn disconnect(&self, user: UserUuid) -> Result<(), AccountingServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_integration(&mut tx, user, ACCOUNTING_SERVICE)
            .await?;

        tx.commit().await?;

        if rows_affected == 0 {
            return Err(AccountingServiceError::NotConnected);
        }

        tracing::info!(user_uuid = %user, "accounting service disconnected");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AccountingService: Send + Sync {
    /// Whether the user has a completed accounting connection.
    async fn connection_status(
        &self,
        user: UserUuid,
    ) -> Result<ConnectionStatus, AccountingServiceError>;

    /// Start the handshake: persist a fresh `state` and return the provider
    /// authorize URL to redirect the user to.
    async fn begin_connect(&self, user: UserUuid) -> Result<String, AccountingServiceError>;

    /// Finish the handshake: verify `state`, exchange `code` for tokens, and
    /// store them.
    async fn complete_connect(
        &self,
        user: UserUuid,
        code: &str,
        state: &str,
    ) -> Result<(), AccountingServiceError>;

    /// Drop the stored connection, pending or complete.
    async fn disconnect(&self, user: UserUuid) -> Result<(), AccountingServiceError>;
}
