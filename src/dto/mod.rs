//! DTO modules that bridge services with the HTTP layer.

pub mod orders;
