//! Validated value objects for catalog records.
//!
//! Constructors reject values the `books` and `users` tables must never hold,
//! so code past the form layer can use them without re-checking.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    #[error("id must be greater than zero")]
    NonPositiveId,
    #[error("value cannot be empty")]
    EmptyString,
    #[error("value is longer than {max} characters")]
    TooLong { max: usize },
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Integer primary key that is always positive.
macro_rules! positive_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                (value > 0)
                    .then_some(Self(value))
                    .ok_or(TypeConstraintError::NonPositiveId)
            }

            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// Trimmed text with at least one and at most `max` characters.
macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident, max = $max:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub const MAX_LEN: usize = $max;

            pub fn new(value: impl Into<String>) -> Result<Self, TypeConstraintError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                if trimmed.chars().count() > Self::MAX_LEN {
                    return Err(TypeConstraintError::TooLong { max: Self::MAX_LEN });
                }
                Ok(Self(trimmed.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

positive_id!(
    /// Primary key of a `books` row.
    BookId
);
positive_id!(
    /// Primary key of a `users` row.
    UserId
);

bounded_text!(BookName, max = 255);
bounded_text!(AuthorName, max = 255);
bounded_text!(
    /// Login name, unique across accounts.
    Username,
    max = 64
);

/// Non-negative page count of a book.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageCount(i32);

impl PageCount {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value < 0 {
            return Err(TypeConstraintError::InvalidValue(format!(
                "page count must not be negative, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Finite, non-negative price.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if !value.is_finite() || value < 0.0 {
            return Err(TypeConstraintError::InvalidValue(format!(
                "price must be a finite non-negative number, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(BookId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(BookId::new(-4), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(BookId::new(7).map(BookId::get), Ok(7));
    }

    #[test]
    fn names_are_trimmed_and_non_empty() {
        assert_eq!(BookName::new("  Dune ").unwrap().as_str(), "Dune");
        assert_eq!(
            AuthorName::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
    }

    #[test]
    fn usernames_are_length_bounded() {
        assert!(Username::new("a".repeat(64)).is_ok());
        assert_eq!(
            Username::new("a".repeat(65)),
            Err(TypeConstraintError::TooLong { max: 64 })
        );
    }

    #[test]
    fn price_rejects_negative_and_non_finite_values() {
        assert!(Price::new(-0.5).is_err());
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
        assert_eq!(Price::new(12.5).map(Price::get), Ok(12.5));
    }

    #[test]
    fn page_count_rejects_negative_values() {
        assert!(PageCount::new(-1).is_err());
        assert_eq!(PageCount::new(0).map(PageCount::get), Ok(0));
    }
}
