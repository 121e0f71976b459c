//! Write payloads
//!
//! Everything sent through [`RotalyClient::insert`](crate::RotalyClient::insert)
//! or [`RotalyClient::update`](crate::RotalyClient::update) implements
//! [`Payload`]. Typed payloads describe their own schema; a failing schema
//! stops the write before any request is built.

use rotaly_core::validation::ValidationResult;
use serde::Serialize;

/// A serialisable write body with an optional local schema check
pub trait Payload: Serialize + Sync {
    /// Check the payload; the default accepts everything
    fn validate(&self) -> ValidationResult {
        ValidationResult::new()
    }
}

/// Untyped maps are forwarded without a schema
impl Payload for serde_json::Map<String, serde_json::Value> {}

impl Payload for serde_json::Value {}
