//! Author Handlers

use jiff::civil::Date;
use salvo::prelude::StatusError;

use crate::extensions::*;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// Parse an optional `YYYY-MM-DD` payload field.
pub(crate) fn parse_date(
    value: Option<String>,
    field: &str,
) -> Result<Option<Date>, StatusError> {
    value
        .map(|value| value.parse::<Date>())
        .transpose()
        .or_400(&format!("could not parse \"{field}\" as a date"))
}
