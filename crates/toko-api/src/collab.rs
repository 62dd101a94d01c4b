//! Collaborator endpoints consumed only for their array lengths.
//!
//! The dashboard shows user and product totals next to the order stats.
//! Those catalogs belong to other subsystems, so the rows are kept opaque
//! (`serde_json::Value`) and only counted. Any schema the server uses for
//! the row bodies decodes here unchanged.

use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::http::Backend;
use crate::session::Session;

#[derive(Debug, Clone, Deserialize)]
struct UsersPayload {
    #[serde(default)]
    users: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProductsPayload {
    #[serde(default)]
    products: Vec<serde_json::Value>,
}

/// User and product totals for the dashboard.
#[derive(Debug, Clone)]
pub struct CollabApi {
    backend: Arc<Backend>,
}

impl CollabApi {
    pub fn new(backend: Arc<Backend>) -> Self {
        Self { backend }
    }

    /// `GET user`: number of registered users.
    pub async fn user_count(&self, session: &Session) -> ApiResult<usize> {
        let envelope = self.backend.get::<UsersPayload>(session, "user").await?;
        Ok(envelope.into_result()?.users.len())
    }

    /// `GET product`: number of catalog products.
    pub async fn product_count(&self, session: &Session) -> ApiResult<usize> {
        let envelope = self
            .backend
            .get::<ProductsPayload>(session, "product")
            .await?;
        Ok(envelope.into_result()?.products.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Envelope;

    #[test]
    fn test_rows_counted_without_schema_assumptions() {
        let body = r#"{
            "success": true,
            "users": [
                {"id": "u-1", "name": "Sari"},
                {"email": "other@example.com", "extra": {"nested": true}},
                {}
            ]
        }"#;
        let envelope: Envelope<UsersPayload> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.into_result().unwrap().users.len(), 3);
    }

    #[test]
    fn test_missing_array_counts_as_zero() {
        let body = r#"{"success": true}"#;
        let envelope: Envelope<ProductsPayload> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.into_result().unwrap().products.len(), 0);
    }
}
