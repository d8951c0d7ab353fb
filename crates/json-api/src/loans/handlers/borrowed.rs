//! All Loans Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, loans::errors::into_status_error, state::State};

use super::LoanedCopyResponse;

/// Every copy currently on loan
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BorrowedResponse {
    pub loans: Vec<LoanedCopyResponse>,
}

/// All Loans Handler
///
/// Lists every copy on loan, library-wide. Librarians only.
#[endpoint(tags("loans"), summary = "All Loans", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BorrowedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _librarian = depot.librarian_or_403()?;

    let loans = state
        .app
        .loans
        .list_all_on_loan()
        .await
        .map_err(into_status_error)?;

    Ok(Json(BorrowedResponse {
        loans: loans.into_iter().map(Into::into).collect(),
    }))
}
