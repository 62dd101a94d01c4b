//! Typed wrappers for the cart endpoints.
//!
//! The server owns the cart; these calls mutate or read it and return
//! either the decoded payload or the server's acknowledgement message.
//! Quantity rules (positive, clamped) are enforced by the layer above,
//! not here. This module is a faithful transcription of the HTTP contract.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use toko_core::Cart;

use crate::envelope::Ack;
use crate::error::ApiResult;
use crate::http::Backend;
use crate::session::Session;

// =============================================================================
// Request / response shapes
// =============================================================================

/// Body for `POST cart/add` and `PUT cart/update`.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// Body for `DELETE cart/remove`.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveItemRequest {
    pub product_id: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CartPayload {
    cart: Cart,
}

#[derive(Debug, Clone, Deserialize)]
struct CountPayload {
    count: i64,
}

// =============================================================================
// Endpoint wrappers
// =============================================================================

/// Cart endpoints of the storefront API.
#[derive(Debug, Clone)]
pub struct CartApi {
    backend: Arc<Backend>,
}

impl CartApi {
    pub fn new(backend: Arc<Backend>) -> Self {
        Self { backend }
    }

    /// `GET cart`: the server's current cart for this session.
    pub async fn fetch(&self, session: &Session) -> ApiResult<Cart> {
        let envelope = self.backend.get::<CartPayload>(session, "cart").await?;
        Ok(envelope.into_result()?.cart)
    }

    /// `POST cart/add`: add a product or increment its quantity.
    pub async fn add(
        &self,
        session: &Session,
        product_id: &str,
        quantity: i64,
    ) -> ApiResult<Option<String>> {
        let body = CartLineRequest {
            product_id: product_id.to_string(),
            quantity,
        };
        let envelope = self
            .backend
            .send_json::<_, Ack>(Method::POST, session, "cart/add", &body)
            .await?;
        envelope.into_ack()
    }

    /// `PUT cart/update`: set an item's quantity outright.
    pub async fn update(
        &self,
        session: &Session,
        product_id: &str,
        quantity: i64,
    ) -> ApiResult<Option<String>> {
        let body = CartLineRequest {
            product_id: product_id.to_string(),
            quantity,
        };
        let envelope = self
            .backend
            .send_json::<_, Ack>(Method::PUT, session, "cart/update", &body)
            .await?;
        envelope.into_ack()
    }

    /// `DELETE cart/remove`: drop an item regardless of quantity.
    pub async fn remove(&self, session: &Session, product_id: &str) -> ApiResult<Option<String>> {
        let body = RemoveItemRequest {
            product_id: product_id.to_string(),
        };
        let envelope = self
            .backend
            .send_json::<_, Ack>(Method::DELETE, session, "cart/remove", &body)
            .await?;
        envelope.into_ack()
    }

    /// `DELETE cart/clear`: empty the cart.
    pub async fn clear(&self, session: &Session) -> ApiResult<Option<String>> {
        let envelope = self
            .backend
            .send_empty::<Ack>(Method::DELETE, session, "cart/clear")
            .await?;
        envelope.into_ack()
    }

    /// `GET cart/count`: item count without fetching the whole cart.
    pub async fn count(&self, session: &Session) -> ApiResult<i64> {
        let envelope = self
            .backend
            .get::<CountPayload>(session, "cart/count")
            .await?;
        Ok(envelope.into_result()?.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Envelope;

    #[test]
    fn test_cart_payload_decodes_nested_cart() {
        let body = r#"{
            "success": true,
            "cart": {
                "items": [
                    {"product_id": "p-1", "quantity": 2, "price_at_addition": 100000}
                ],
                "total_price": 200000
            }
        }"#;
        let envelope: Envelope<CartPayload> = serde_json::from_str(body).unwrap();
        let cart = envelope.into_result().unwrap().cart;
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total().amount(), 200_000);
    }

    #[test]
    fn test_add_request_wire_shape() {
        let body = CartLineRequest {
            product_id: "p-9".to_string(),
            quantity: 3,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["product_id"], "p-9");
        assert_eq!(json["quantity"], 3);
    }

    #[test]
    fn test_count_payload_decodes() {
        let body = r#"{"success": true, "count": 7}"#;
        let envelope: Envelope<CountPayload> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.into_result().unwrap().count, 7);
    }
}
