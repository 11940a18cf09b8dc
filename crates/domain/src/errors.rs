//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for DealScope
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum DealScopeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited by CRM, retry after {0}s")]
    RateLimited(u64),

    #[error("CRM error (status {status}): {message}")]
    Crm { status: u16, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DealScopeError {
    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::NotFound(_) => "not_found",
            Self::RateLimited(_) => "rate_limited",
            Self::Crm { .. } => "crm",
            Self::InvalidInput(_) => "invalid_input",
            Self::Export(_) => "export",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for DealScope operations
pub type Result<T> = std::result::Result<T, DealScopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let err = DealScopeError::Config("missing token".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Config");
        assert_eq!(json["message"], "missing token");
    }

    #[test]
    fn crm_error_display_includes_status() {
        let err = DealScopeError::Crm { status: 502, message: "bad gateway".into() };
        assert_eq!(err.to_string(), "CRM error (status 502): bad gateway");
        assert_eq!(err.label(), "crm");
    }
}
