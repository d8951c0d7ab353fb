//! Shared fixtures for database-backed tests.

pub mod db;
