//! Order history desks for the two storefront audiences.
//!
//! [`OrderDesk`] serves the signed-in customer: their own orders, plus the
//! self-service "I have paid" flow. [`AdminDesk`] serves the shop staff:
//! every order, plus the dual status/payment update.
//!
//! Both desks gate locally before spending a round trip. A signed-out
//! caller, a customer on the admin surface, or an illegal status change is
//! refused without the server ever hearing about it. Ownership of a
//! specific order can only be checked against the fetched record, so that
//! guard runs after exactly one fetch.

use std::sync::Arc;

use tracing::info;

use toko_api::{Session, SessionStore};
use toko_core::status::{validate_admin_update, validate_customer_payment_update};
use toko_core::{Actor, CoreError, CustomerPaymentPolicy, Order, OrderStatus, PaymentStatus};

use crate::backend::OrderBackend;
use crate::error::SyncResult;

// =============================================================================
// Customer desk
// =============================================================================

/// Order history and payment confirmation for the signed-in customer.
pub struct OrderDesk {
    backend: Arc<dyn OrderBackend>,
    sessions: Arc<SessionStore>,
    policy: CustomerPaymentPolicy,
}

impl OrderDesk {
    pub fn new(
        backend: Arc<dyn OrderBackend>,
        sessions: Arc<SessionStore>,
        policy: CustomerPaymentPolicy,
    ) -> Self {
        Self {
            backend,
            sessions,
            policy,
        }
    }

    /// The signed-in customer's orders, newest first as the server returns
    /// them.
    pub async fn my_orders(&self) -> SyncResult<Vec<Order>> {
        self.sessions.require().await?;
        self.backend.customer_orders().await
    }

    /// A single order, refused unless it belongs to the signed-in customer.
    ///
    /// The server scopes the detail endpoint by token already; this guard
    /// keeps a stale or mixed-up route parameter from ever rendering
    /// another customer's address block.
    pub async fn order_detail(&self, order_id: &str) -> SyncResult<Order> {
        let session = self.sessions.require().await?;
        let order = self.backend.customer_order(order_id).await?;
        if order.user_id != session.user.id {
            return Err(CoreError::ActorNotPermitted {
                actor: Actor::Customer.as_str(),
                action: "view another customer's order",
            }
            .into());
        }
        Ok(order)
    }

    /// Marks the customer's own pending payment as paid.
    ///
    /// Policy refusals never cost a round trip; the pending check needs the
    /// current record and therefore costs one fetch.
    pub async fn confirm_payment(&self, order_id: &str) -> SyncResult<Option<String>> {
        if self.policy == CustomerPaymentPolicy::GatewayOnly {
            return Err(CoreError::ActorNotPermitted {
                actor: Actor::Customer.as_str(),
                action: "mark payment status",
            }
            .into());
        }

        let order = self.order_detail(order_id).await?;
        validate_customer_payment_update(order.payment_status, PaymentStatus::Paid, self.policy)?;

        let message = self
            .backend
            .update_payment(order_id, PaymentStatus::Paid)
            .await?;
        info!(order_id, "Customer confirmed payment");
        Ok(message)
    }
}

// =============================================================================
// Admin desk
// =============================================================================

/// Order management for shop staff.
pub struct AdminDesk {
    backend: Arc<dyn OrderBackend>,
    sessions: Arc<SessionStore>,
}

impl AdminDesk {
    pub fn new(backend: Arc<dyn OrderBackend>, sessions: Arc<SessionStore>) -> Self {
        Self { backend, sessions }
    }

    async fn require_admin(&self, action: &'static str) -> SyncResult<Session> {
        let session = self.sessions.require().await?;
        if !session.is_admin() {
            return Err(CoreError::ActorNotPermitted {
                actor: session.actor().as_str(),
                action,
            }
            .into());
        }
        Ok(session)
    }

    /// Every order in the shop, across all customers.
    pub async fn all_orders(&self) -> SyncResult<Vec<Order>> {
        self.require_admin("list all orders").await?;
        self.backend.admin_orders().await
    }

    /// Full detail of any order.
    pub async fn order_detail(&self, order_id: &str) -> SyncResult<Order> {
        self.require_admin("view order management").await?;
        self.backend.admin_order(order_id).await
    }

    /// Moves an order along both lifecycle axes at once.
    ///
    /// Either axis may stay where it is; the transition tables treat
    /// holding position as legal. The current record is fetched first so
    /// the tables judge the real starting point, not what the admin screen
    /// last rendered.
    pub async fn update(
        &self,
        order_id: &str,
        new_status: OrderStatus,
        new_payment: PaymentStatus,
    ) -> SyncResult<Option<String>> {
        let session = self.require_admin("update order status").await?;
        let current = self.backend.admin_order(order_id).await?;

        validate_admin_update(
            session.actor(),
            current.status,
            current.payment_status,
            new_status,
            new_payment,
        )?;

        let message = self
            .backend
            .admin_update(order_id, new_status, new_payment)
            .await?;
        info!(
            order_id,
            from_status = current.status.as_str(),
            to_status = new_status.as_str(),
            from_payment = current.payment_status.as_str(),
            to_payment = new_payment.as_str(),
            "Admin updated order"
        );
        Ok(message)
    }
}
