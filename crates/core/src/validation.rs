//! Payload validation
//!
//! Write payloads are checked locally before they are transmitted, so a
//! malformed booking or ticket fails with a named field instead of an opaque
//! backend rejection.
//!
//! # Example
//!
//! ```rust
//! use rotaly_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("subject", "Late check-in")
//!     .max_length("subject", "Late check-in", 200)
//!     .validate();
//!
//! if !result.is_valid() {
//!     for error in result.errors() {
//!         eprintln!("Validation error: {}", error);
//!     }
//! }
//! ```

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Validation error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    /// Convert to Result type
    ///
    /// # Errors
    ///
    /// Returns a [`ErrorCode::ValidationError`](crate::ErrorCode::ValidationError) error
    /// listing every failed field.
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
            Err(Error::validation(format!(
                "Validation failed: {}",
                messages.join("; ")
            )))
        }
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    #[must_use]
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    fn fail(
        &mut self,
        field: &str,
        message: String,
        code: &str,
        expected: Option<String>,
        actual: Option<String>,
    ) {
        self.result.add_error(ValidationError {
            field: field.to_string(),
            message,
            code: code.to_string(),
            expected,
            actual,
        });
    }

    /// Validate that a field is not empty
    #[must_use]
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.fail(
                field,
                "Field is required".to_string(),
                "REQUIRED",
                Some("non-empty value".to_string()),
                Some("empty".to_string()),
            );
        }
        self
    }

    /// Validate maximum length (in characters)
    #[must_use]
    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        let len = value.chars().count();
        if len > max {
            self.fail(
                field,
                format!("Must be at most {max} characters"),
                "MAX_LENGTH",
                Some(format!("<= {max} chars")),
                Some(format!("{len} chars")),
            );
        }
        self
    }

    /// Validate an email address shape
    #[must_use]
    pub fn email(mut self, field: &str, value: &str) -> Self {
        let ok = EMAIL_RE.as_ref().is_some_and(|re| re.is_match(value));
        if !ok {
            self.fail(
                field,
                "Must be a valid email address".to_string(),
                "EMAIL",
                Some("name@domain.tld".to_string()),
                Some(value.to_string()),
            );
        }
        self
    }

    /// Validate an optional email address; `None` passes
    #[must_use]
    pub fn optional_email(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.email(field, v),
            None => self,
        }
    }

    /// Validate that `value` lies within `min..=max`
    #[must_use]
    pub fn range<T: PartialOrd + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            self.fail(
                field,
                format!("Must be between {min} and {max}"),
                "RANGE",
                Some(format!("{min} - {max}")),
                Some(value.to_string()),
            );
        }
        self
    }

    /// Validate that a number is not negative
    #[must_use]
    pub fn non_negative(mut self, field: &str, value: f64) -> Self {
        if value.is_nan() || value < 0.0 {
            self.fail(
                field,
                "Must not be negative".to_string(),
                "NON_NEGATIVE",
                Some(">= 0".to_string()),
                Some(value.to_string()),
            );
        }
        self
    }

    /// Add a custom validation
    #[must_use]
    pub fn custom<F>(mut self, field: &str, f: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(message) = f() {
            self.fail(field, message, "CUSTOM", None, None);
        }
        self
    }

    /// Complete validation and return result
    #[must_use]
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}
