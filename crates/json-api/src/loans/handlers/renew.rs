//! Renew Loan Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::*},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bibliotek_app::domain::loans::models::BookCopy;

use crate::{authors::parse_date, extensions::*, loans::errors::into_status_error, state::State};

/// Renew Loan Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RenewRequest {
    /// New due date, ISO 8601. Defaults to three weeks from today.
    pub due_back: Option<String>,
}

/// Renewed copy
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookCopyResponse {
    pub uuid: Uuid,
    pub book_uuid: Uuid,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<String>,
    pub borrower_uuid: Option<Uuid>,
}

impl From<BookCopy> for BookCopyResponse {
    fn from(copy: BookCopy) -> Self {
        BookCopyResponse {
            uuid: copy.uuid.into(),
            book_uuid: copy.book_uuid.into(),
            imprint: copy.imprint,
            status: copy.status.to_string(),
            due_back: copy.due_back.as_ref().map(ToString::to_string),
            borrower_uuid: copy.borrower_uuid.map(Into::into),
        }
    }
}

/// Renew Loan Handler
///
/// Pushes a borrowed copy's due date out. Librarians only.
#[endpoint(tags("loans"), summary = "Renew Loan", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    copy: PathParam<Uuid>,
    renew: JsonBody<RenewRequest>,
    depot: &mut Depot,
) -> Result<Json<BookCopyResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _librarian = depot.librarian_or_403()?;

    let due_back = parse_date(renew.into_inner().due_back, "due_back")?;

    let renewed = state
        .app
        .loans
        .renew_copy(copy.into_inner().into(), due_back)
        .await
        .map_err(into_status_error)?;

    Ok(Json(renewed.into()))
}
