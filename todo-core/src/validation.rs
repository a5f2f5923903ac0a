//! Validation error types and validated names
//!
//! All user input is validated when building the field sets that reach
//! the store. Invalid input returns ValidationError, not panic.

use std::fmt;

/// Maximum length for list and item names
pub const MAX_NAME_LEN: usize = 256;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is absent from the payload
    Missing { field: &'static str },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Invalid enum variant
    InvalidVariant { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validated, trimmed name of a list or item
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    /// Validate a name taken from a request payload.
    ///
    /// # Rules
    /// - Must be present
    /// - Must not be blank after trimming
    /// - Max 256 characters
    ///
    /// # Example
    /// ```
    /// use todo_core::Name;
    ///
    /// assert_eq!(Name::parse(Some("  Groceries ")).unwrap().as_str(), "Groceries");
    /// assert!(Name::parse(Some("   ")).is_err());
    /// assert!(Name::parse(None).is_err());
    /// ```
    pub fn parse(value: Option<&str>) -> Result<Self, ValidationError> {
        let value = value.ok_or(ValidationError::Missing { field: "name" })?.trim();

        if value.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        if value.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }

        Ok(Self(value.to_owned()))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Blank descriptions are stored as absent.
pub(crate) fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}
