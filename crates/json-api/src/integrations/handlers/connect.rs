//! Begin Accounting Connect Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use crate::{extensions::*, integrations::errors::into_status_error, state::State};

/// Begin Accounting Connect Handler
///
/// Starts the OAuth handshake and redirects the caller to the provider's
/// authorize page.
#[endpoint(
    tags("integrations"),
    summary = "Connect Accounting",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::SEE_OTHER, description = "Redirect to the provider"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.auth_user_or_401()?;

    let authorize_url = state
        .app
        .accounting
        .begin_connect(user.uuid)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, authorize_url, true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::SEE_OTHER);

    Ok(())
}
