//! Import Books Handler
//!
//! Bulk catalog import from a CSV request body.

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use bibliotek_app::domain::imports::{ImportsServiceError, models::ImportReport};

use crate::{extensions::*, state::State};

/// One skipped CSV row
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SkippedRowResponse {
    /// 1-based CSV data line number
    pub line: u64,

    /// Why the row was skipped
    pub reason: String,
}

/// Import result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImportReportResponse {
    /// Books created by this run
    pub created: u64,

    /// Authors created along the way
    pub authors_created: u64,

    /// Rows that did not become books
    pub skipped: Vec<SkippedRowResponse>,
}

impl From<ImportReport> for ImportReportResponse {
    fn from(report: ImportReport) -> Self {
        ImportReportResponse {
            created: report.created,
            authors_created: report.authors_created,
            skipped: report
                .skipped
                .into_iter()
                .map(|row| SkippedRowResponse {
                    line: row.line,
                    reason: row.reason,
                })
                .collect(),
        }
    }
}

fn import_status_error(error: ImportsServiceError) -> StatusError {
    match error {
        ImportsServiceError::MalformedCsv(reason) => {
            StatusError::bad_request().brief(format!("Malformed CSV: {reason}"))
        }
        ImportsServiceError::MissingColumn(column) => {
            StatusError::bad_request().brief(format!("Missing required column {column:?}"))
        }
        ImportsServiceError::Sql(source) => {
            error!("catalog import storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Import Books Handler
///
/// Accepts a CSV body and imports it into the catalog.
#[endpoint(
    tags("books"),
    summary = "Import Books from CSV",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Import finished"),
        (status_code = StatusCode::FORBIDDEN, description = "Librarian role required"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unreadable CSV"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ImportReportResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _librarian = depot.librarian_or_403()?;

    let csv = req.payload().await.or_400("could not read request body")?;

    let report = state
        .app
        .imports
        .import_books(csv)
        .await
        .map_err(import_status_error)?;

    Ok(Json(report.into()))
}
