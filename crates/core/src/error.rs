//! Error types for the catalyst rater.
//!
//! Two families matter to callers: validation failures on construction input
//! and lifecycle-state violations. Both carry enough context (field name or
//! entity id) to act on.

use thiserror::Error;

/// Errors surfaced by the tracker, scoring engine, and comparator.
#[derive(Debug, Error)]
pub enum RaterError {
    /// Malformed or out-of-enum construction input.
    #[error("validation error: {field}: {message}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// Operation invalid for the entity's current lifecycle state.
    #[error("invalid state for {entity_id}: {message}")]
    InvalidState {
        /// Id of the event or rating involved.
        entity_id: String,
        /// Why the operation was rejected.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RaterError {
    /// Creates a validation error for a named field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Creates an invalid-state error for an entity.
    pub fn invalid_state(entity_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidState {
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for RaterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for rater operations.
pub type Result<T> = std::result::Result<T, RaterError>;
