//! Failures of the order store.

use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Columns guarded by CHECK or UNIQUE constraints in the `orders` table.
const CONSTRAINED_COLUMNS: [&str; 5] = [
    "payment_method",
    "delivery_type",
    "total_cents",
    "public_id",
    "status",
];

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("order not found")]
    NotFound,

    #[error("database error: {0}")]
    DatabaseError(String),

    /// A stored row no longer maps onto the domain types.
    #[error("invalid stored order: {0}")]
    ValidationError(String),

    #[error("order store unavailable: {0}")]
    ConnectionError(String),

    #[error("constraint violated on orders.{column}: {message}")]
    ConstraintViolation { column: &'static str, message: String },

    #[error("unexpected database error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Picks the constrained column SQLite names in its error message.
fn violated_column(message: &str) -> &'static str {
    CONSTRAINED_COLUMNS
        .into_iter()
        .find(|column| message.contains(column))
        .unwrap_or("unknown")
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(
                DatabaseErrorKind::CheckViolation | DatabaseErrorKind::UniqueViolation,
                info,
            ) => {
                let message = info.message().to_string();
                RepositoryError::ConstraintViolation {
                    column: violated_column(&message),
                    message,
                }
            }
            DieselError::DatabaseError(_, info) => {
                RepositoryError::DatabaseError(info.message().to_string())
            }
            DieselError::DeserializationError(e) => RepositoryError::ValidationError(e.to_string()),
            other => RepositoryError::Unexpected(other.to_string()),
        }
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(err.to_string())
    }
}
