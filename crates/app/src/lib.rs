//! Shared application domain and persistence modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod integrations;

mod uuids;

#[cfg(test)]
mod test;

pub use uuids::TypedUuid;
