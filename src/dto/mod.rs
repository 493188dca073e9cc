//! Data handed from services to templates.

pub mod books;
pub mod products;
