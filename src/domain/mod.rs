//! Domain aggregates and query descriptors for the catalog.

pub mod book;
pub mod filter;
pub mod types;
pub mod user;
