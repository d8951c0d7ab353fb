//! Integration Status Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use bibliotek_app::integrations::accounting::ConnectionStatus;

use crate::{extensions::*, integrations::errors::into_status_error, state::State};

/// Accounting connection state
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IntegrationsResponse {
    /// Whether the caller has a completed accounting connection
    pub connected: bool,

    /// When the connection completed, ISO 8601
    pub connected_at: Option<String>,
}

impl From<ConnectionStatus> for IntegrationsResponse {
    fn from(status: ConnectionStatus) -> Self {
        IntegrationsResponse {
            connected: status.connected,
            connected_at: status.connected_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Integration Status Handler
///
/// Reports whether the caller's accounting connection is live.
#[endpoint(
    tags("integrations"),
    summary = "Integration Status",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<IntegrationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.auth_user_or_401()?;

    let status = state
        .app
        .accounting
        .connection_status(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(status.into()))
}
