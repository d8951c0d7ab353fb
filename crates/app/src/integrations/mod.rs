//! Third-party integrations.

pub mod accounting;
