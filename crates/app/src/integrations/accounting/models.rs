//! Accounting integration models.

use jiff::Timestamp;

/// Whether the user has an accounting connection, as shown on the
/// integrations page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub connected_at: Option<Timestamp>,
}

/// One row of `integration_tokens`.
///
/// A row with only `oauth_state` set is a pending handshake; `connected_at`
/// marks a completed one.
#[derive(Debug, Clone)]
pub(crate) struct IntegrationTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at: Option<Timestamp>,
    pub oauth_state: Option<String>,
    pub connected_at: Option<Timestamp>,
}
