//! Database error types for hlm-db.

use hlm_auth::AuthError;
use hlm_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A required field is missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The acting role failed the mutation guard.
    #[error("Role '{role}' is not allowed to {action}")]
    Unauthorized { role: String, action: String },

    /// No valid session.
    #[error("not signed in, run `hlm auth sign-in`")]
    NotAuthenticated,

    /// Sign-in with an unknown email or a wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Approval advance from a terminal or unrecognized state.
    #[error("Invalid transition for {id} from '{from}': {reason}")]
    InvalidTransition {
        id: String,
        from: String,
        reason: String,
    },

    #[error("{table} '{id}' not found")]
    NotFound { table: String, id: String },

    /// The data write committed but its audit entry was not written.
    #[error("{table} '{record_id}' was changed but the audit entry failed: {source}")]
    AuditGap {
        table: String,
        record_id: String,
        source: Box<DatabaseError>,
    },

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// The operation does not apply to the current state (e.g. double check-out).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A row snapshot or JSON column could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// User-facing classification of a [`DatabaseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authorization,
    InvalidTransition,
    Persistence,
    AuditGap,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::InvalidTransition => "invalid_transition",
            Self::Persistence => "persistence",
            Self::AuditGap => "audit_gap",
        }
    }
}

impl DatabaseError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidState(_) => ErrorKind::Validation,
            Self::Unauthorized { .. } | Self::NotAuthenticated | Self::InvalidCredentials => {
                ErrorKind::Authorization
            }
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::AuditGap { .. } => ErrorKind::AuditGap,
            Self::NotFound { .. }
            | Self::Query(_)
            | Self::Migration(_)
            | Self::NoResult
            | Self::Serialization(_)
            | Self::LibSql(_)
            | Self::Other(_) => ErrorKind::Persistence,
        }
    }

    pub(crate) fn not_found(table: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            table: table.into(),
            id: id.into(),
        }
    }
}

impl From<CoreError> for DatabaseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::NotFound { entity_type, id } => Self::not_found(entity_type, id),
            CoreError::InvalidTransition { id, from, reason, .. } => {
                Self::InvalidTransition { id, from, reason }
            }
            CoreError::Unauthorized { role, action } => Self::Unauthorized { role, action },
            CoreError::Other(e) => Self::Other(e),
        }
    }
}

impl From<AuthError> for DatabaseError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmptyPassword => Self::Validation(err.to_string()),
            AuthError::NotAuthenticated => Self::NotAuthenticated,
            other => Self::Other(other.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            DatabaseError::Validation("x".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            DatabaseError::Unauthorized {
                role: "employee".into(),
                action: "approve tasks".into()
            }
            .kind(),
            ErrorKind::Authorization
        );
        assert_eq!(DatabaseError::NoResult.kind(), ErrorKind::Persistence);
        let gap = DatabaseError::AuditGap {
            table: "clients".into(),
            record_id: "cli-1".into(),
            source: Box::new(DatabaseError::Query("boom".into())),
        };
        assert_eq!(gap.kind(), ErrorKind::AuditGap);
        assert_eq!(gap.kind().as_str(), "audit_gap");
    }

    #[test]
    fn json_errors_are_persistence_failures() {
        let err: DatabaseError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, DatabaseError::Serialization(_)));
        assert_eq!(err.kind(), ErrorKind::Persistence);
    }

    #[test]
    fn core_validation_maps_to_validation() {
        let err: DatabaseError = CoreError::Validation("title is required".into()).into();
        assert!(matches!(err, DatabaseError::Validation(ref m) if m == "title is required"));
    }
}
