//! # Domain Types
//!
//! Core domain types used throughout the Toko storefront client.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │     Order       │   │   OrderItem     │   │  ShippingInfo   │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id             │   │  product_name   │   │  full_name      │        │
//! │  │  order_number   │   │  price (frozen) │   │  email, phone   │        │
//! │  │  status ×2 axes │   │  quantity       │   │  address, city  │        │
//! │  │  total_amount   │   │  weight         │   │  postal_code    │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │  OrderStatus    │   │ PaymentStatus   │   │ ShippingMethod  │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  Pending        │   │  Pending        │   │  Standard  15k  │        │
//! │  │  Processing     │   │  Paid           │   │  Express   35k  │        │
//! │  │  Shipped        │   │  Failed         │   │  SameDay   75k  │        │
//! │  │  Delivered      │   └─────────────────┘   └─────────────────┘        │
//! │  │  Cancelled      │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Order items freeze product data (name, price, weight, image) at placement
//! time. Later catalog edits never rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Rupiah;
use crate::weight::Grams;

// =============================================================================
// Order Status
// =============================================================================

/// The fulfillment status of an order.
///
/// Transition rules live in [`crate::status`]; this type is pure data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, not yet picked up by the shop.
    Pending,
    /// Shop is preparing the order.
    Processing,
    /// Order handed to the courier.
    Shipped,
    /// Courier confirmed delivery (terminal).
    Delivered,
    /// Order cancelled before shipment (terminal).
    Cancelled,
}

impl OrderStatus {
    /// Wire/display name, matching the backend's snake_case strings.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal statuses accept no further fulfillment changes.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// The payment status of an order, independent of fulfillment.
///
/// A shipped order can still be unpaid (bank transfer pending) and a pending
/// order can already be paid. Revenue counts only the Delivered+Paid join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting payment confirmation.
    Pending,
    /// Payment confirmed.
    Paid,
    /// Payment rejected or abandoned.
    Failed,
}

impl PaymentStatus {
    /// Wire/display name, matching the backend's snake_case strings.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Shipping Method
// =============================================================================

/// Flat-rate shipping options offered at checkout.
///
/// Costs are fixed per method, not by distance or weight. The table is the
/// single source of truth for both the checkout summary and the server
/// request (the server re-derives the cost from the method name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    /// Regular courier, 3-5 days.
    Standard,
    /// Priority courier, 1-2 days.
    Express,
    /// Same-day city delivery.
    SameDay,
}

impl ShippingMethod {
    /// Flat shipping cost for this method.
    ///
    /// ## Example
    /// ```rust
    /// use toko_core::types::ShippingMethod;
    ///
    /// assert_eq!(ShippingMethod::Standard.cost().amount(), 15_000);
    /// assert_eq!(ShippingMethod::Express.cost().amount(), 35_000);
    /// assert_eq!(ShippingMethod::SameDay.cost().amount(), 75_000);
    /// ```
    pub const fn cost(&self) -> Rupiah {
        match self {
            ShippingMethod::Standard => Rupiah::new(15_000),
            ShippingMethod::Express => Rupiah::new(35_000),
            ShippingMethod::SameDay => Rupiah::new(75_000),
        }
    }

    /// Human-readable label for checkout display.
    pub const fn label(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "Standard (3-5 days)",
            ShippingMethod::Express => "Express (1-2 days)",
            ShippingMethod::SameDay => "Same Day",
        }
    }

    /// All methods, in display order.
    pub const fn all() -> [ShippingMethod; 3] {
        [
            ShippingMethod::Standard,
            ShippingMethod::Express,
            ShippingMethod::SameDay,
        ]
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Manual bank transfer, confirmed out of band.
    BankTransfer,
    /// Cash on delivery.
    CashOnDelivery,
    /// E-wallet payment.
    Ewallet,
}

impl PaymentMethod {
    /// Human-readable label for checkout display.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::Ewallet => "E-Wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Shipping Info
// =============================================================================

/// Delivery details captured once at order placement.
///
/// This is a snapshot: later profile edits never touch placed orders.
/// Validation rules live in [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    /// Free-form courier note.
    #[serde(default)]
    pub notes: Option<String>,
}

// =============================================================================
// Product Reference
// =============================================================================

/// Display-only product data attached to cart lines by the server.
///
/// Never used for pricing decisions: the authoritative price of a cart line
/// is its frozen `price_at_addition`, and the authoritative weight of an
/// order line is its frozen `weight`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: String,
    pub name: String,
    /// Current catalog price, shown struck through when it drifted from the
    /// frozen cart price.
    pub price: Rupiah,
    /// Unit weight in grams; absent for weightless items (vouchers).
    #[serde(default)]
    pub weight: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
    /// Sales unit label ("pcs", "pack").
    #[serde(default)]
    pub unit: Option<String>,
}

impl ProductRef {
    /// Unit weight with missing catalog data degraded to zero.
    #[inline]
    pub fn unit_weight(&self) -> Grams {
        Grams::from_optional(self.weight)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item on a placed order.
/// Uses snapshot pattern to freeze product data at placement time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub product_id: String,
    /// Product name at placement time (frozen).
    pub product_name: String,
    /// Unit price at placement time (frozen).
    pub price: Rupiah,
    /// Quantity ordered.
    pub quantity: i64,
    /// Unit weight in grams at placement time (frozen).
    pub weight: Grams,
    /// Product image at placement time (frozen).
    #[serde(default)]
    pub product_image: Option<String>,
}

impl OrderItem {
    /// Line total (price × quantity).
    #[inline]
    pub fn line_total(&self) -> Rupiah {
        self.price.multiply_quantity(self.quantity)
    }

    /// Line weight (unit weight × quantity).
    #[inline]
    pub fn line_weight(&self) -> Grams {
        self.weight.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order. Immutable history except for the two status axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Human-readable business identifier shown on receipts.
    pub order_number: String,
    /// Owning customer.
    pub user_id: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub shipping_info: ShippingInfo,
    pub payment_method: PaymentMethod,
    pub shipping_method: ShippingMethod,
    /// Item subtotal at placement time.
    pub subtotal: Rupiah,
    /// Flat cost of the chosen shipping method at placement time.
    pub shipping_cost: Rupiah,
    /// subtotal + shipping_cost, computed by the server at placement.
    pub total_amount: Rupiah,
    /// Sum of line weights at placement time.
    #[serde(default)]
    pub total_weight: Grams,
    /// Line items; list endpoints may omit them, detail endpoints include them.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Recipient name from the shipping snapshot (dashboard display).
    #[inline]
    pub fn customer_name(&self) -> &str {
        &self.shipping_info.full_name
    }

    /// Recomputes the item subtotal from line snapshots.
    ///
    /// Used to cross-check server totals in tests; the `subtotal` field
    /// remains authoritative for display.
    pub fn derived_subtotal(&self) -> Rupiah {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Recomputes the total weight from line snapshots.
    pub fn derived_weight(&self) -> Grams {
        self.items.iter().map(|i| i.line_weight()).sum()
    }
}

// =============================================================================
// User
// =============================================================================

/// Role attached to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Customer
    }
}

/// The authenticated user, as returned at login and persisted alongside the
/// token. One of the two durable pieces of client state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

// =============================================================================
// Unit Tests
// =============================================================================
