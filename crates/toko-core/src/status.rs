//! # Order Lifecycle State Machine
//!
//! Transition rules for the two independent status axes on every order.
//!
//! ## Transition Diagram
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FULFILLMENT AXIS (OrderStatus)                                         │
//! │                                                                         │
//! │   pending ──► processing ──► shipped ──► delivered (terminal)           │
//! │      │             │                                                    │
//! │      └─────────────┴──► cancelled (terminal)                            │
//! │                                                                         │
//! │  PAYMENT AXIS (PaymentStatus)                                           │
//! │                                                                         │
//! │   pending ──► paid   (terminal)                                         │
//! │      │                                                                  │
//! │      └──────► failed (terminal)                                         │
//! │                                                                         │
//! │  The axes are independent: a shipped order may be unpaid, a pending     │
//! │  order may be paid. Restating the current value is always allowed so    │
//! │  a combined update can move one axis while leaving the other alone.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Actors
//! - **Admin** drives both axes through the combined admin update.
//! - **Customer** may only mark payment on their own order, only while the
//!   payment is still pending, and only when the shop allows self-service
//!   payment confirmation (see [`CustomerPaymentPolicy`]).
//!
//! Every rule here runs client-side before a request is issued, so invalid
//! changes are rejected without a round trip.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{OrderStatus, PaymentStatus, Role};

// =============================================================================
// Transition Tables
// =============================================================================

impl OrderStatus {
    /// Checks whether the fulfillment axis may move from `self` to `to`.
    ///
    /// Restating the current status is allowed; skipping forward (pending
    /// straight to shipped) or moving backward is not. Cancellation is only
    /// reachable before shipment.
    ///
    /// ## Example
    /// ```rust
    /// use toko_core::types::OrderStatus;
    ///
    /// assert!(OrderStatus::Pending.can_transition(OrderStatus::Processing));
    /// assert!(OrderStatus::Processing.can_transition(OrderStatus::Cancelled));
    /// assert!(!OrderStatus::Shipped.can_transition(OrderStatus::Cancelled));
    /// assert!(!OrderStatus::Delivered.can_transition(OrderStatus::Pending));
    /// ```
    pub const fn can_transition(self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, to) {
            // Restating the current value is a no-op, always accepted.
            (Pending, Pending)
            | (Processing, Processing)
            | (Shipped, Shipped)
            | (Delivered, Delivered)
            | (Cancelled, Cancelled) => true,
            // Forward motion, one step at a time.
            (Pending, Processing) | (Processing, Shipped) | (Shipped, Delivered) => true,
            // Cancellation, only before the parcel leaves.
            (Pending, Cancelled) | (Processing, Cancelled) => true,
            _ => false,
        }
    }
}

impl PaymentStatus {
    /// Checks whether the payment axis may move from `self` to `to`.
    ///
    /// Payment resolves exactly once: pending goes to paid or failed, and
    /// both outcomes are final. There is no client-side path back to
    /// pending; refunds are handled out of band.
    pub const fn can_transition(self, to: PaymentStatus) -> bool {
        use PaymentStatus::*;
        match (self, to) {
            (Pending, Pending) | (Paid, Paid) | (Failed, Failed) => true,
            (Pending, Paid) | (Pending, Failed) => true,
            _ => false,
        }
    }
}

// =============================================================================
// Actors
// =============================================================================

/// Who is attempting a lifecycle change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    Admin,
    Customer,
}

impl Actor {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Actor::Admin => "admin",
            Actor::Customer => "customer",
        }
    }

    /// Only admins may move the fulfillment axis.
    pub const fn may_drive_fulfillment(&self) -> bool {
        matches!(self, Actor::Admin)
    }
}

impl From<Role> for Actor {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Actor::Admin,
            Role::Customer => Actor::Customer,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Customer Payment Policy
// =============================================================================

/// Whether customers may confirm their own payment.
///
/// The storefront ships with manual bank-transfer flows where the customer
/// presses "I have paid" and the shop verifies the transfer later. Shops
/// that wire up a payment gateway instead should switch to `GatewayOnly`,
/// which blocks the self-service path entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerPaymentPolicy {
    /// Customers may mark their own pending payment as paid (default).
    SelfService,
    /// Payment status only moves through backend/gateway channels.
    GatewayOnly,
}

impl Default for CustomerPaymentPolicy {
    fn default() -> Self {
        CustomerPaymentPolicy::SelfService
    }
}

impl CustomerPaymentPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CustomerPaymentPolicy::SelfService => "self_service",
            CustomerPaymentPolicy::GatewayOnly => "gateway_only",
        }
    }
}

impl FromStr for CustomerPaymentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "self_service" | "selfservice" => Ok(CustomerPaymentPolicy::SelfService),
            "gateway_only" | "gatewayonly" => Ok(CustomerPaymentPolicy::GatewayOnly),
            other => Err(format!(
                "Invalid payment policy '{}'. Use: self_service, gateway_only",
                other
            )),
        }
    }
}

impl fmt::Display for CustomerPaymentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Update Validation
// =============================================================================

/// Validates the combined admin update (`status` + `payment_status` in one
/// request) against both transition tables.
///
/// Each axis is checked independently, so an admin can cancel an order
/// while restating an already-paid payment status.
///
/// ## Example
/// ```rust
/// use toko_core::status::{validate_admin_update, Actor};
/// use toko_core::types::{OrderStatus, PaymentStatus};
///
/// // Cancel a paid order: valid (payment axis restated).
/// assert!(validate_admin_update(
///     Actor::Admin,
///     OrderStatus::Pending,
///     PaymentStatus::Paid,
///     OrderStatus::Cancelled,
///     PaymentStatus::Paid,
/// )
/// .is_ok());
/// ```
pub fn validate_admin_update(
    actor: Actor,
    current_status: OrderStatus,
    current_payment: PaymentStatus,
    new_status: OrderStatus,
    new_payment: PaymentStatus,
) -> CoreResult<()> {
    if !actor.may_drive_fulfillment() {
        return Err(CoreError::ActorNotPermitted {
            actor: actor.as_str(),
            action: "update order status",
        });
    }

    if !current_status.can_transition(new_status) {
        return Err(CoreError::InvalidTransition {
            axis: "order status",
            from: current_status.as_str().to_string(),
            to: new_status.as_str().to_string(),
        });
    }

    if !current_payment.can_transition(new_payment) {
        return Err(CoreError::InvalidTransition {
            axis: "payment status",
            from: current_payment.as_str().to_string(),
            to: new_payment.as_str().to_string(),
        });
    }

    Ok(())
}

/// Validates a customer marking payment on their own order.
///
/// Three gates, in order: the shop must allow self-service payment, the
/// payment must still be pending, and the requested value must be a legal
/// transition from pending.
pub fn validate_customer_payment_update(
    current: PaymentStatus,
    requested: PaymentStatus,
    policy: CustomerPaymentPolicy,
) -> CoreResult<()> {
    if policy == CustomerPaymentPolicy::GatewayOnly {
        return Err(CoreError::ActorNotPermitted {
            actor: Actor::Customer.as_str(),
            action: "mark payment status",
        });
    }

    if current != PaymentStatus::Pending {
        return Err(CoreError::PaymentNotPending {
            current: current.as_str().to_string(),
        });
    }

    if !current.can_transition(requested) {
        return Err(CoreError::InvalidTransition {
            axis: "payment status",
            from: current.as_str().to_string(),
            to: requested.as_str().to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Revenue Rule
// =============================================================================

/// The joint revenue rule: an order counts toward revenue only when it is
/// both delivered and paid.
///
/// A cancelled order never counts, even if its payment axis reads paid
/// (the money is owed back, refund tracking is out of scope here).
///
/// ## Example
/// ```rust
/// use toko_core::status::counts_toward_revenue;
/// use toko_core::types::{OrderStatus, PaymentStatus};
///
/// assert!(counts_toward_revenue(OrderStatus::Delivered, PaymentStatus::Paid));
/// assert!(!counts_toward_revenue(OrderStatus::Delivered, PaymentStatus::Pending));
/// assert!(!counts_toward_revenue(OrderStatus::Cancelled, PaymentStatus::Paid));
/// ```
#[inline]
pub const fn counts_toward_revenue(status: OrderStatus, payment: PaymentStatus) -> bool {
    matches!(status, OrderStatus::Delivered) && matches!(payment, PaymentStatus::Paid)
}

// =============================================================================
// Unit Tests
// =============================================================================
