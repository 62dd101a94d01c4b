//! Typed wrappers for the order endpoints.
//!
//! Covers both the customer surface (place, list, view, payment update) and
//! the admin surface (list, view, combined status update). Authorization
//! rules and state-machine checks run in the layer above; the server remains
//! the final authority and answers `success: false` when a request is out
//! of line.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use toko_core::{Order, OrderStatus, PaymentMethod, PaymentStatus, ShippingInfo, ShippingMethod};

use crate::envelope::Ack;
use crate::error::ApiResult;
use crate::http::Backend;
use crate::session::Session;

// =============================================================================
// Request / response shapes
// =============================================================================

/// Body for `POST order/place`.
///
/// No prices appear here. The server computes subtotal, shipping cost and
/// total from its own cart state and the chosen shipping method.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceOrderRequest {
    pub shipping_info: ShippingInfo,
    pub payment_method: PaymentMethod,
    pub shipping_method: ShippingMethod,
}

/// Body for `POST order/update-payment/:id`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePaymentRequest {
    pub payment_status: PaymentStatus,
}

/// Body for `POST order/admin-update/:id`.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUpdateRequest {
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, Deserialize)]
struct OrderPayload {
    order: Order,
}

#[derive(Debug, Clone, Deserialize)]
struct OrdersPayload {
    #[serde(default)]
    orders: Vec<Order>,
}

// =============================================================================
// Endpoint wrappers
// =============================================================================

/// Order endpoints of the storefront API.
#[derive(Debug, Clone)]
pub struct OrderApi {
    backend: Arc<Backend>,
}

impl OrderApi {
    pub fn new(backend: Arc<Backend>) -> Self {
        Self { backend }
    }

    /// `POST order/place`: turn the server-side cart into an order.
    ///
    /// Returns the created order as the server recorded it.
    pub async fn place(&self, session: &Session, request: &PlaceOrderRequest) -> ApiResult<Order> {
        let envelope = self
            .backend
            .send_json::<_, OrderPayload>(Method::POST, session, "order/place", request)
            .await?;
        Ok(envelope.into_result()?.order)
    }

    /// `GET order/list`: the signed-in customer's own orders.
    pub async fn list(&self, session: &Session) -> ApiResult<Vec<Order>> {
        let envelope = self
            .backend
            .get::<OrdersPayload>(session, "order/list")
            .await?;
        Ok(envelope.into_result()?.orders)
    }

    /// `GET order/view/:id`: one of the customer's orders in full.
    pub async fn view(&self, session: &Session, order_id: &str) -> ApiResult<Order> {
        let path = format!("order/view/{}", order_id);
        let envelope = self.backend.get::<OrderPayload>(session, &path).await?;
        Ok(envelope.into_result()?.order)
    }

    /// `POST order/update-payment/:id`: customer-side payment confirmation.
    pub async fn update_payment(
        &self,
        session: &Session,
        order_id: &str,
        payment_status: PaymentStatus,
    ) -> ApiResult<Option<String>> {
        let path = format!("order/update-payment/{}", order_id);
        let body = UpdatePaymentRequest { payment_status };
        let envelope = self
            .backend
            .send_json::<_, Ack>(Method::POST, session, &path, &body)
            .await?;
        envelope.into_ack()
    }

    /// `GET order/admin-list`: every order in the shop.
    pub async fn admin_list(&self, session: &Session) -> ApiResult<Vec<Order>> {
        let envelope = self
            .backend
            .get::<OrdersPayload>(session, "order/admin-list")
            .await?;
        Ok(envelope.into_result()?.orders)
    }

    /// `GET order/admin-view/:id`: any order in full.
    pub async fn admin_view(&self, session: &Session, order_id: &str) -> ApiResult<Order> {
        let path = format!("order/admin-view/{}", order_id);
        let envelope = self.backend.get::<OrderPayload>(session, &path).await?;
        Ok(envelope.into_result()?.order)
    }

    /// `POST order/admin-update/:id`: combined status + payment update.
    pub async fn admin_update(
        &self,
        session: &Session,
        order_id: &str,
        status: OrderStatus,
        payment_status: PaymentStatus,
    ) -> ApiResult<Option<String>> {
        let path = format!("order/admin-update/{}", order_id);
        let body = AdminUpdateRequest {
            status,
            payment_status,
        };
        let envelope = self
            .backend
            .send_json::<_, Ack>(Method::POST, session, &path, &body)
            .await?;
        envelope.into_ack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Envelope;

    #[test]
    fn test_place_request_wire_shape() {
        let request = PlaceOrderRequest {
            shipping_info: ShippingInfo {
                full_name: "Sari Dewi".to_string(),
                email: "sari@example.com".to_string(),
                phone: "081234567890".to_string(),
                address: "Jl. Merdeka No. 10, RT 02".to_string(),
                city: "Bandung".to_string(),
                postal_code: "40111".to_string(),
                notes: None,
            },
            payment_method: PaymentMethod::BankTransfer,
            shipping_method: ShippingMethod::Express,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["payment_method"], "bank_transfer");
        assert_eq!(json["shipping_method"], "express");
        assert_eq!(json["shipping_info"]["full_name"], "Sari Dewi");
        assert_eq!(json["shipping_info"]["postal_code"], "40111");
    }

    #[test]
    fn test_update_requests_use_wire_names() {
        let body = UpdatePaymentRequest {
            payment_status: PaymentStatus::Paid,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["payment_status"], "paid");

        let body = AdminUpdateRequest {
            status: OrderStatus::Shipped,
            payment_status: PaymentStatus::Pending,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "shipped");
        assert_eq!(json["payment_status"], "pending");
    }

    #[test]
    fn test_order_payload_decodes() {
        let body = r#"{
            "success": true,
            "order": {
                "id": "ord-1",
                "order_number": "TK-2026-0001",
                "user_id": "u-1",
                "status": "pending",
                "payment_status": "pending",
                "shipping_info": {
                    "full_name": "Sari Dewi",
                    "email": "sari@example.com",
                    "phone": "081234567890",
                    "address": "Jl. Merdeka No. 10, RT 02",
                    "city": "Bandung",
                    "postal_code": "40111"
                },
                "payment_method": "bank_transfer",
                "shipping_method": "standard",
                "subtotal": 250000,
                "shipping_cost": 15000,
                "total_amount": 265000,
                "created_at": "2026-01-15T10:00:00Z"
            }
        }"#;
        let envelope: Envelope<OrderPayload> = serde_json::from_str(body).unwrap();
        let order = envelope.into_result().unwrap().order;
        assert_eq!(order.order_number, "TK-2026-0001");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount.amount(), 265_000);
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_orders_list_defaults_to_empty() {
        let body = r#"{"success": true}"#;
        let envelope: Envelope<OrdersPayload> = serde_json::from_str(body).unwrap();
        assert!(envelope.into_result().unwrap().orders.is_empty());
    }
}
