//! Error types for the API layer.
//!
//! Every failure a request can hit is folded into [`ApiError`]. The variants
//! are grouped by which stage of a request they belong to, because callers
//! react to the stage rather than the exact cause:
//!
//! - Authentication failures send the user back to the sign-in screen.
//! - Validation failures are shown inline and never reach the network.
//! - Network and decode failures are shown as transient faults.
//! - Server rejections carry the server's own message verbatim.
//!
//! No variant is ever retried automatically. The caller decides whether to
//! issue the same request again.

use thiserror::Error;

/// Convenient Result alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// All errors that can occur while talking to the storefront backend.
#[derive(Debug, Error)]
pub enum ApiError {
    // ==========================================================================
    // Authentication Errors
    // ==========================================================================
    /// No session is held, so the request was never sent.
    #[error("Not signed in")]
    MissingSession,

    /// The server rejected the bearer token (HTTP 401 or 403).
    #[error("Session rejected by server, sign in again")]
    Unauthorized,

    // ==========================================================================
    // Validation Errors (raised before any network traffic)
    // ==========================================================================
    /// Client-side input validation failed.
    #[error(transparent)]
    Validation(#[from] toko_core::ValidationError),

    // ==========================================================================
    // Network Errors
    // ==========================================================================
    /// Transport-level failure (DNS, connect, TLS, aborted body).
    #[error("Network error: {0}")]
    Network(String),

    /// The configured request timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    /// The server answered with a non-success HTTP status other than 401/403.
    #[error("Server returned HTTP {status}")]
    HttpStatus { status: u16 },

    // ==========================================================================
    // Server Errors
    // ==========================================================================
    /// The server answered 2xx but set `success: false` in the envelope.
    #[error("{message}")]
    Rejected { message: String },

    // ==========================================================================
    // Decode Errors
    // ==========================================================================
    /// The response body did not match the expected envelope shape.
    #[error("Malformed server response: {0}")]
    Decode(String),

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// The configured base URL is not a usable http(s) URL.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// A configuration value failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading or parsing the config file failed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Writing the config file failed.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // ==========================================================================
    // Credential Store Errors
    // ==========================================================================
    /// Reading or parsing the stored credentials failed.
    #[error("Failed to load credentials: {0}")]
    CredentialLoadFailed(String),

    /// Persisting credentials failed.
    #[error("Failed to save credentials: {0}")]
    CredentialSaveFailed(String),
}

impl ApiError {
    /// True when the only sensible reaction is a fresh sign-in.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::MissingSession | ApiError::Unauthorized)
    }

    /// True when this is a client-side validation failure. These never
    /// produced network traffic, so the backend state is untouched.
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }

    /// True when the failure happened below the application protocol.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ApiError::Network(_) | ApiError::Timeout | ApiError::HttpStatus { .. }
        )
    }

    /// True when the server processed the request and said no.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}

// ==============================================================================
// Conversions from common error types
// ==============================================================================

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for ApiError {
    fn from(err: toml::de::Error) -> Self {
        ApiError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ApiError {
    fn from(err: toml::ser::Error) -> Self {
        ApiError::ConfigSaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::HttpStatus { status: 502 };
        assert_eq!(err.to_string(), "Server returned HTTP 502");

        let err = ApiError::Rejected {
            message: "Insufficient stock for Kopi Gayo".to_string(),
        };
        assert_eq!(err.to_string(), "Insufficient stock for Kopi Gayo");
    }

    #[test]
    fn test_requires_login() {
        assert!(ApiError::MissingSession.requires_login());
        assert!(ApiError::Unauthorized.requires_login());
        assert!(!ApiError::Timeout.requires_login());
        assert!(!ApiError::Rejected { message: "no".into() }.requires_login());
    }

    #[test]
    fn test_is_network() {
        assert!(ApiError::Network("connection refused".into()).is_network());
        assert!(ApiError::Timeout.is_network());
        assert!(ApiError::HttpStatus { status: 500 }.is_network());
        assert!(!ApiError::Unauthorized.is_network());
        assert!(!ApiError::Decode("truncated".into()).is_network());
    }

    #[test]
    fn test_validation_error_converts() {
        let core = toko_core::ValidationError::Required {
            field: "full name".to_string(),
        };
        let err: ApiError = core.into();
        assert!(err.is_validation());
        assert!(!err.is_network());
    }

    #[test]
    fn test_json_error_becomes_decode() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json");
        let err: ApiError = bad.unwrap_err().into();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
