//! Database row models and runtime configuration.

pub mod book;
#[cfg(feature = "server")]
pub mod config;
pub mod user;
