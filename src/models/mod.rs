//! Database and infrastructure models shared across the order service.

#[cfg(feature = "server")]
pub mod auth;
pub mod config;
pub mod order;
