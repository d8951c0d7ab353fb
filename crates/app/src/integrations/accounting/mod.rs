//! Accounting service OAuth integration.
//!
//! The handshake is the plain authorization-code flow: redirect the user to
//! the provider with a stored `state`, then exchange the returned code for
//! tokens with a single POST. No refresh, no retry.

mod client;
mod errors;
mod models;
mod repository;
mod service;

pub use client::*;
pub use errors::*;
pub use models::*;
pub use service::*;
