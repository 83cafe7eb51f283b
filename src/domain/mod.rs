//! Domain aggregates exposed by the order back-office service layer.

pub mod order;
pub mod sync;
pub mod types;
