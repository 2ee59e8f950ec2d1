//! Error types for the Hive Nervous System
//!
//! Provides a unified error type shared by the window store, the billing
//! seam, and the gateway.

use thiserror::Error;

/// Result type alias using HiveError
pub type Result<T> = std::result::Result<T, HiveError>;

/// Unified error type for hive operations
#[derive(Debug, Error)]
pub enum HiveError {
    // Credential header absent or empty; surfaced as HTTP 401
    #[error("Missing API Key")]
    MissingApiKey,

    // Window store errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Billing collaborator errors; isolated from the response path
    #[error("Billing error: {0}")]
    Billing(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

// Implement From for common external error types
impl From<serde_json::Error> for HiveError {
    fn from(err: serde_json::Error) -> Self {
        HiveError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for HiveError {
    fn from(err: std::io::Error) -> Self {
        HiveError::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for HiveError {
    fn from(err: anyhow::Error) -> Self {
        HiveError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message() {
        let err = HiveError::MissingApiKey;
        assert_eq!(err.to_string(), "Missing API Key");
    }

    #[test]
    fn test_storage_error_display() {
        let err = HiveError::Storage("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
