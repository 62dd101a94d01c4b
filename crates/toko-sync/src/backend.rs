//! # Backend Seams
//!
//! The synchronization components talk to the server through these traits
//! rather than through `toko-api` directly. Production wiring uses the
//! `Api*` adapters below; tests substitute in-memory fakes and exercise the
//! same code paths without a server.
//!
//! Each adapter resolves the session itself, so a signed-out client fails
//! with `MissingSession` before any request is built.

use async_trait::async_trait;
use std::sync::Arc;

use toko_api::{CartApi, CollabApi, OrderApi, PlaceOrderRequest, SessionStore};
use toko_core::{Cart, Order, OrderStatus, PaymentStatus};

use crate::error::SyncResult;

// =============================================================================
// Traits
// =============================================================================

/// Server operations on the cart.
#[async_trait]
pub trait CartBackend: Send + Sync {
    async fn fetch_cart(&self) -> SyncResult<Cart>;
    async fn add_item(&self, product_id: &str, quantity: i64) -> SyncResult<Option<String>>;
    async fn update_item(&self, product_id: &str, quantity: i64) -> SyncResult<Option<String>>;
    async fn remove_item(&self, product_id: &str) -> SyncResult<Option<String>>;
    async fn clear(&self) -> SyncResult<Option<String>>;
    async fn count(&self) -> SyncResult<i64>;
}

/// Server operations on orders, customer and admin surfaces alike.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    async fn place_order(&self, request: &PlaceOrderRequest) -> SyncResult<Order>;
    async fn customer_orders(&self) -> SyncResult<Vec<Order>>;
    async fn customer_order(&self, order_id: &str) -> SyncResult<Order>;
    async fn update_payment(
        &self,
        order_id: &str,
        payment_status: PaymentStatus,
    ) -> SyncResult<Option<String>>;
    async fn admin_orders(&self) -> SyncResult<Vec<Order>>;
    async fn admin_order(&self, order_id: &str) -> SyncResult<Order>;
    async fn admin_update(
        &self,
        order_id: &str,
        status: OrderStatus,
        payment_status: PaymentStatus,
    ) -> SyncResult<Option<String>>;
}

/// Reads feeding the dashboard aggregation.
#[async_trait]
pub trait StatsBackend: Send + Sync {
    async fn orders(&self) -> SyncResult<Vec<Order>>;
    async fn user_count(&self) -> SyncResult<usize>;
    async fn product_count(&self) -> SyncResult<usize>;
}

// =============================================================================
// toko-api adapters
// =============================================================================

/// [`CartBackend`] backed by the storefront REST API.
pub struct ApiCartBackend {
    api: CartApi,
    sessions: Arc<SessionStore>,
}

impl ApiCartBackend {
    pub fn new(api: CartApi, sessions: Arc<SessionStore>) -> Self {
        Self { api, sessions }
    }
}

#[async_trait]
impl CartBackend for ApiCartBackend {
    async fn fetch_cart(&self) -> SyncResult<Cart> {
        let session = self.sessions.require().await?;
        Ok(self.api.fetch(&session).await?)
    }

    async fn add_item(&self, product_id: &str, quantity: i64) -> SyncResult<Option<String>> {
        let session = self.sessions.require().await?;
        Ok(self.api.add(&session, product_id, quantity).await?)
    }

    async fn update_item(&self, product_id: &str, quantity: i64) -> SyncResult<Option<String>> {
        let session = self.sessions.require().await?;
        Ok(self.api.update(&session, product_id, quantity).await?)
    }

    async fn remove_item(&self, product_id: &str) -> SyncResult<Option<String>> {
        let session = self.sessions.require().await?;
        Ok(self.api.remove(&session, product_id).await?)
    }

    async fn clear(&self) -> SyncResult<Option<String>> {
        let session = self.sessions.require().await?;
        Ok(self.api.clear(&session).await?)
    }

    async fn count(&self) -> SyncResult<i64> {
        let session = self.sessions.require().await?;
        Ok(self.api.count(&session).await?)
    }
}

/// [`OrderBackend`] backed by the storefront REST API.
pub struct ApiOrderBackend {
    api: OrderApi,
    sessions: Arc<SessionStore>,
}

impl ApiOrderBackend {
    pub fn new(api: OrderApi, sessions: Arc<SessionStore>) -> Self {
        Self { api, sessions }
    }
}

#[async_trait]
impl OrderBackend for ApiOrderBackend {
    async fn place_order(&self, request: &PlaceOrderRequest) -> SyncResult<Order> {
        let session = self.sessions.require().await?;
        Ok(self.api.place(&session, request).await?)
    }

    async fn customer_orders(&self) -> SyncResult<Vec<Order>> {
        let session = self.sessions.require().await?;
        Ok(self.api.list(&session).await?)
    }

    async fn customer_order(&self, order_id: &str) -> SyncResult<Order> {
        let session = self.sessions.require().await?;
        Ok(self.api.view(&session, order_id).await?)
    }

    async fn update_payment(
        &self,
        order_id: &str,
        payment_status: PaymentStatus,
    ) -> SyncResult<Option<String>> {
        let session = self.sessions.require().await?;
        Ok(self
            .api
            .update_payment(&session, order_id, payment_status)
            .await?)
    }

    async fn admin_orders(&self) -> SyncResult<Vec<Order>> {
        let session = self.sessions.require().await?;
        Ok(self.api.admin_list(&session).await?)
    }

    async fn admin_order(&self, order_id: &str) -> SyncResult<Order> {
        let session = self.sessions.require().await?;
        Ok(self.api.admin_view(&session, order_id).await?)
    }

    async fn admin_update(
        &self,
        order_id: &str,
        status: OrderStatus,
        payment_status: PaymentStatus,
    ) -> SyncResult<Option<String>> {
        let session = self.sessions.require().await?;
        Ok(self
            .api
            .admin_update(&session, order_id, status, payment_status)
            .await?)
    }
}

/// [`StatsBackend`] combining the order list with the collaborator counts.
pub struct ApiStatsBackend {
    orders: OrderApi,
    collab: CollabApi,
    sessions: Arc<SessionStore>,
}

impl ApiStatsBackend {
    pub fn new(orders: OrderApi, collab: CollabApi, sessions: Arc<SessionStore>) -> Self {
        Self {
            orders,
            collab,
            sessions,
        }
    }
}

#[async_trait]
impl StatsBackend for ApiStatsBackend {
    async fn orders(&self) -> SyncResult<Vec<Order>> {
        let session = self.sessions.require().await?;
        Ok(self.orders.admin_list(&session).await?)
    }

    async fn user_count(&self) -> SyncResult<usize> {
        let session = self.sessions.require().await?;
        Ok(self.collab.user_count(&session).await?)
    }

    async fn product_count(&self) -> SyncResult<usize> {
        let session = self.sessions.require().await?;
        Ok(self.collab.product_count(&session).await?)
    }
}
