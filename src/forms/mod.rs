//! Request parameter and form parsing.

use thiserror::Error;
use validator::ValidationErrors;

pub mod auth;
pub mod books;
pub mod products;

#[derive(Debug, Error)]
/// Errors that can occur when processing request parameters or form data.
pub enum FormError {
    /// A present value could not be parsed into the type its field requires.
    #[error("invalid value for `{field}`")]
    InvalidField { field: &'static str },

    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),
}

impl FormError {
    /// Name of the offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FormError::InvalidField { field } => Some(*field),
            FormError::Validation(_) => None,
        }
    }
}

/// Treats missing and all-whitespace values alike. Anything else is returned
/// verbatim.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses a present, non-blank value, reporting `field` when it is malformed.
pub(crate) fn parse_field<T: std::str::FromStr>(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<T>, FormError> {
    non_blank(value)
        .map(|raw| raw.trim().parse::<T>().map_err(|_| FormError::InvalidField { field }))
        .transpose()
}
