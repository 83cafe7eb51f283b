//! Services implementing the back-office workflows.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::models::auth::{AuthenticatedUser, check_role};
use crate::repository::errors::RepositoryError;

pub mod orders;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// Invalid user input; the message is shown to the user.
    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        log::warn!("Rejected form input: {val}");
        match val {
            FormError::InvalidStatus => ServiceError::Form("Некорректный статус заказа".to_string()),
            FormError::InvalidOrderId => ServiceError::NotFound,
            FormError::Validation(_) => ServiceError::Form("Ошибка валидации формы".to_string()),
        }
    }
}

/// Fails with [`ServiceError::Unauthorized`] unless the user holds `role`.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if check_role(role, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}
