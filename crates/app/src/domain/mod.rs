//! Domain modules

pub mod authors;
pub mod books;
pub mod carts;
pub mod imports;
pub mod loans;
pub mod stats;
pub mod users;

pub(crate) mod rows;
