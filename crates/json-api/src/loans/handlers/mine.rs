//! My Loans Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, loans::errors::into_status_error, state::State};

use super::LoanedCopyResponse;

/// The caller's borrowed copies
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MyLoansResponse {
    pub loans: Vec<LoanedCopyResponse>,
}

/// My Loans Handler
///
/// Lists the copies currently borrowed by the authenticated user.
#[endpoint(tags("loans"), summary = "My Loans", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MyLoansResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.auth_user_or_401()?;

    let loans = state
        .app
        .loans
        .list_borrowed_by(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MyLoansResponse {
        loans: loans.into_iter().map(Into::into).collect(),
    }))
}
