//! Error types for rollcall.

use thiserror::Error;

/// Errors produced by rollcall operations.
#[derive(Debug, Error)]
pub enum RollcallError {
    /// The persistence layer could not be reached or a query failed.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Configuration could not be loaded, saved, or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The requesting user is not allowed to run the operation.
    #[error("{0}")]
    PermissionDenied(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RollcallError {
    /// Whether this error came from the storage layer.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<rusqlite::Error> for RollcallError {
    fn from(e: rusqlite::Error) -> Self {
        Self::StorageUnavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rusqlite_errors_map_to_storage() {
        let err: RollcallError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(err.is_storage());
        assert!(err.to_string().starts_with("Storage unavailable"));
    }

    #[test]
    fn test_permission_denied_message_is_verbatim() {
        let err = RollcallError::PermissionDenied("Only admins can use this command.".into());
        assert_eq!(err.to_string(), "Only admins can use this command.");
        assert!(!err.is_storage());
    }
}
