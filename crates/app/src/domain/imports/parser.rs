//! Catalog CSV parsing.
//!
//! Header-driven: required columns must be present, recognized optional
//! columns fill in book fields, and anything else lands in row metadata.

use csv::{ReaderBuilder, StringRecord};
use serde_json::{Map, Value};

use crate::domain::imports::{
    errors::ImportsServiceError,
    models::{BookImportRow, SkippedRow},
};

const REQUIRED_COLUMNS: [&str; 5] = [
    "title",
    "author_first_name",
    "author_last_name",
    "isbn",
    "price",
];

const KNOWN_COLUMNS: [&str; 9] = [
    "title",
    "author_first_name",
    "author_last_name",
    "isbn",
    "price",
    "qty_on_hand",
    "summary",
    "language",
    "genres",
];

/// Parse catalog CSV bytes into importable rows.
///
/// Returns the parsed rows with their 1-based data line numbers, plus the
/// rows that were skipped and why. Only structural problems (unreadable
/// CSV, a missing required column) fail the whole parse.
///
/// # Errors
///
/// Returns an error when the CSV cannot be read or the header is missing a
/// required column.
pub fn parse_catalog_csv(
    bytes: &[u8],
) -> Result<(Vec<(u64, BookImportRow)>, Vec<SkippedRow>), ImportsServiceError> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(bytes);

    let headers = reader.headers()?.clone();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(ImportsServiceError::MissingColumn(required));
        }
    }

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let line = index as u64 + 1;
        let record = record?;

        match parse_row(&headers, &record) {
            Ok(row) => rows.push((line, row)),
            Err(reason) => skipped.push(SkippedRow { line, reason }),
        }
    }

    Ok((rows, skipped))
}

fn parse_row(headers: &StringRecord, record: &StringRecord) -> Result<BookImportRow, String> {
    let field = |name: &str| -> Option<&str> {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|i| record.get(i))
    };

    let required = |name: &'static str| -> Result<String, String> {
        match field(name) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(format!("empty required field {name:?}")),
        }
    };

    let title = required("title")?;
    let author_first_name = required("author_first_name")?;
    let author_last_name = required("author_last_name")?;
    let isbn = required("isbn")?;

    let price = field("price")
        .and_then(parse_price_minor)
        .ok_or_else(|| "unparseable price".to_string())?;

    let qty_on_hand = match field("qty_on_hand") {
        None | Some("") => 0,
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_parse_error| format!("unparseable qty_on_hand {raw:?}"))?,
    };

    let summary = field("summary").unwrap_or_default().to_string();

    let language = field("language")
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    let genres = field("genres")
        .unwrap_or_default()
        .split('|')
        .map(str::trim)
        .filter(|genre| !genre.is_empty())
        .map(ToString::to_string)
        .collect();

    // Everything the importer does not recognize rides along as metadata.
    let mut metadata = Map::new();

    for (header, value) in headers.iter().zip(record.iter()) {
        if !KNOWN_COLUMNS.contains(&header) && !value.is_empty() {
            metadata.insert(header.to_string(), Value::String(value.to_string()));
        }
    }

    Ok(BookImportRow {
        title,
        author_first_name,
        author_last_name,
        isbn,
        price,
        qty_on_hand,
        summary,
        language,
        genres,
        metadata,
    })
}

/// Parse a decimal price string ("10", "10.5", "10.00") into minor units.
/// More than two decimal places, signs, or other noise are rejected.
fn parse_price_minor(raw: &str) -> Option<u64> {
    let (whole, fraction) = match raw.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (raw, ""),
    };

    if whole.is_empty() || fraction.len() > 2 {
        return None;
    }

    if !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let whole: u64 = whole.parse().ok()?;

    let cents = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().ok()? * 10,
        _ => fraction.parse::<u64>().ok()?,
    };

    whole.checked_mul(100)?.checked_add(cents)
}
