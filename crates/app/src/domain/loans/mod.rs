//! Loans
//!
//! Physical book copies and who has them out.

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::LoansServiceError;
pub use service::*;
