//! Carts
//!
//! The bookstore's shopping-cart subsystem. One active cart per user,
//! items keyed by book identifier, totals recomputed from stored state on
//! every read.

pub mod errors;
pub mod models;
mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
