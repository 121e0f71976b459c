//! Core utilities shared by the Rotaly crates
//!
//! This crate provides the pieces every other crate leans on:
//!
//! - **Error handling**: coded errors with context
//! - **Validation**: a fluent validator for request payloads, run before
//!   anything is sent to the backend
//!
//! # Example
//!
//! ```rust
//! use rotaly_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("guest_name", "Ayşe Yılmaz")
//!     .email("guest_email", "ayse@example.com")
//!     .range("adults", 2, 1, 20)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Error, ErrorCode, Result};
    pub use crate::validation::{ValidationError, ValidationResult, Validator};
}
