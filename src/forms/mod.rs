//! Form definitions backing the order routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod orders;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid order status")]
    InvalidStatus,

    #[error("invalid order id")]
    InvalidOrderId,
}
