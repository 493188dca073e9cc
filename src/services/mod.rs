//! Workflows behind the HTTP handlers, generic over the repository traits.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod books;
pub mod products;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("invalid username or password")]
    Unauthorized,

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
