//! Cross-cutting error types for HLM.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `ConfigError`) are defined in
//! their respective crates. `CoreError` covers failures raised by the pure
//! domain logic in this crate: input validation, state machine transitions,
//! and access checks.

use thiserror::Error;

/// Errors that can be raised by any HLM crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from}: {reason}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        reason: String,
    },

    /// A required field is missing or a value is malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The acting role is not permitted to perform the action.
    #[error("Role '{role}' is not allowed to {action}")]
    Unauthorized { role: String, action: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
