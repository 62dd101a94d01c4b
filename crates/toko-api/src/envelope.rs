//! # Response Envelope
//!
//! Every storefront endpoint answers with the same outer shape:
//!
//! ```json
//! { "success": true, "message": "Product added to cart", ...payload }
//! ```
//!
//! The payload fields sit beside `success` and `message` rather than under a
//! wrapper key, so [`Envelope`] flattens a typed payload struct into the top
//! level. A `success: false` body is decoded the same way and then turned
//! into [`ApiError::Rejected`] carrying the server's message, keeping the
//! HTTP status and the application-level outcome independent.

use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

/// Fallback shown when the server rejects a request without explaining why.
const DEFAULT_REJECTION: &str = "Request rejected by server";

/// Outer shape of every storefront response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Application-level outcome, independent of the HTTP status.
    pub success: bool,

    /// Optional human-readable message from the server.
    #[serde(default)]
    pub message: Option<String>,

    /// Endpoint-specific payload fields, flattened into the top level.
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Extracts the payload, or the server's rejection message on failure.
    pub fn into_result(self) -> ApiResult<T> {
        if self.success {
            Ok(self.payload)
        } else {
            Err(ApiError::Rejected {
                message: self
                    .message
                    .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
            })
        }
    }
}

/// Payload for endpoints that return nothing beyond the envelope itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {}

impl Envelope<Ack> {
    /// Resolves a payload-less response to the server's message.
    pub fn into_ack(self) -> ApiResult<Option<String>> {
        let message = self.message.clone();
        self.into_result().map(|_| message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct CountPayload {
        count: i64,
    }

    #[test]
    fn test_success_envelope_yields_payload() {
        let body = r#"{"success": true, "count": 4}"#;
        let env: Envelope<CountPayload> = serde_json::from_str(body).unwrap();
        let payload = env.into_result().unwrap();
        assert_eq!(payload.count, 4);
    }

    #[test]
    fn test_rejection_carries_server_message() {
        let body = r#"{"success": false, "message": "Cart is empty"}"#;
        let env: Envelope<Ack> = serde_json::from_str(body).unwrap();
        let err = env.into_ack().unwrap_err();
        assert_eq!(err.to_string(), "Cart is empty");
        assert!(err.is_rejection());
    }

    #[test]
    fn test_rejection_without_message_gets_fallback() {
        let body = r#"{"success": false}"#;
        let env: Envelope<Ack> = serde_json::from_str(body).unwrap();
        let err = env.into_ack().unwrap_err();
        assert_eq!(err.to_string(), DEFAULT_REJECTION);
    }

    #[test]
    fn test_ack_preserves_message_on_success() {
        let body = r#"{"success": true, "message": "Product added to cart"}"#;
        let env: Envelope<Ack> = serde_json::from_str(body).unwrap();
        let message = env.into_ack().unwrap();
        assert_eq!(message.as_deref(), Some("Product added to cart"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = r#"{"success": true, "count": 2, "debug_trace": "xyz"}"#;
        let env: Envelope<CountPayload> = serde_json::from_str(body).unwrap();
        assert_eq!(env.into_result().unwrap().count, 2);
    }
}
