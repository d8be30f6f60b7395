//! # Error Types

use shared_types::{Classified, ErrorClass};
use thiserror::Error;

/// Rejections raised while translating contract telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// Custom event type too short after trimming.
    #[error("invalid event: event type too short: '{0}'")]
    TypeTooShort(String),

    /// Attribute key empty after trimming.
    #[error("empty event attribute key (value: '{value}')")]
    EmptyAttributeKey { value: String },

    /// Attribute value empty after trimming.
    #[error("empty event attribute value for key '{key}'")]
    EmptyAttributeValue { key: String },

    /// Attribute key in the system namespace.
    #[error("event attribute name '{key}' is reserved")]
    ReservedAttributeKey { key: String },
}

impl Classified for EventError {
    fn class(&self) -> ErrorClass {
        ErrorClass::Validation
    }
}
