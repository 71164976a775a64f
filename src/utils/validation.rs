//! Small validated-value newtypes used by the config builders.
//!
//! These exist so builder methods can accept `impl TryInto<NonEmptyString>`
//! and reject empty/non-positive values at the point they're set, rather
//! than deferring validation to `build()`.

use std::fmt;

/// A `String` guaranteed to be non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

/// Error returned when a value fails [`NonEmptyString`] or [`PositiveF64`] validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError(pub String);

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

impl NonEmptyString {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(ValidationError("value must not be empty".to_string()))
        } else {
            Ok(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An `f64` guaranteed to be finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositiveF64(f64);

impl PositiveF64 {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ValidationError(format!(
                "value must be a positive, finite number, got {value}"
            )))
        }
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

/// A builder that always produces a value, falling back to defaults
/// instead of failing. Builders that can fail expose a separate
/// fallible `build()` method and implement this trait on top of it.
pub trait Builder<T> {
    fn build(self) -> T;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_string() {
        assert!(NonEmptyString::new("").is_err());
        assert!(NonEmptyString::new("   ").is_err());
        assert!(NonEmptyString::new("ok").is_ok());
    }

    #[test]
    fn rejects_non_positive_f64() {
        assert!(PositiveF64::new(0.0).is_err());
        assert!(PositiveF64::new(-1.0).is_err());
        assert!(PositiveF64::new(f64::NAN).is_err());
        assert!(PositiveF64::new(1.5).is_ok());
    }
}
