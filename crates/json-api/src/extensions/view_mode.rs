//! Cart view-mode query parsing helpers.

use salvo::{oapi::extract::QueryParam, prelude::StatusError};

/// How much of the cart a store endpoint should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViewMode {
    /// Full line-item detail.
    Full,

    /// Just the compact summary shown on the cart button.
    Summary,
}

pub(crate) trait ViewModeExt {
    fn into_view_mode(self) -> Result<ViewMode, StatusError>;
}

impl ViewModeExt for QueryParam<String, false> {
    fn into_view_mode(self) -> Result<ViewMode, StatusError> {
        parse_view_mode(self.into_inner().as_deref())
    }
}

fn parse_view_mode(value: Option<&str>) -> Result<ViewMode, StatusError> {
    match value {
        None | Some("full") => Ok(ViewMode::Full),
        Some("summary") => Ok(ViewMode::Summary),
        Some(_other) => {
            Err(StatusError::bad_request().brief("\"view\" must be \"full\" or \"summary\""))
        }
    }
}
