//! Liveness endpoint.
//!
//! Mounted outside the authenticated subtree so monitors need no token.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Reported while the process is up and serving requests.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"ok"`; monitors should key off the status code.
    pub status: String,
}

/// Healthcheck
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
