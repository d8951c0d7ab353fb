//! Accounting Disconnect Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, integrations::errors::into_status_error, state::State};

/// Accounting Disconnect Handler
///
/// Drops the caller's stored accounting connection.
#[endpoint(
    tags("integrations"),
    summary = "Disconnect Accounting",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.auth_user_or_401()?;

    state
        .app
        .accounting
        .disconnect(user.uuid)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
