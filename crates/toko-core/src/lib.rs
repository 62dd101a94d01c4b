//! # toko-core: Pure Business Logic for the Toko Storefront Client
//!
//! This crate is the **heart** of the storefront client. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Toko Client Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                      UI / Host Application                      │    │
//! │  │    Cart badge ──► Checkout form ──► Order pages ──► Dashboard   │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                    toko-sync (coordination)                     │    │
//! │  │    CartSynchronizer, Checkout, OrderDesk, Dashboard, CartBus    │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ toko-core (THIS CRATE) ★                        │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │   types   │  │   money   │  │   cart    │  │  status   │    │    │
//! │  │   │   Order   │  │  Rupiah   │  │   Cart    │  │ lifecycle │    │    │
//! │  │   │   User    │  │  weight   │  │ CartItem  │  │  tables   │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐                                  │    │
//! │  │   │   stats   │  │ validation│                                  │    │
//! │  │   │ dashboard │  │  shipping │                                  │    │
//! │  │   │ aggregates│  │   rules   │                                  │    │
//! │  │   └───────────┘  └───────────┘                                  │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO NETWORK • NO CHANNELS • PURE FUNCTIONS            │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                    toko-api (HTTP layer)                        │    │
//! │  │          reqwest client, bearer auth, endpoint wrappers         │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, OrderItem, ShippingInfo, User, enums)
//! - [`money`] - Rupiah type with integer arithmetic (no floating point!)
//! - [`weight`] - Grams type with the g/kg display rule
//! - [`cart`] - The server-owned cart mirror and its derivations
//! - [`status`] - Order lifecycle transition tables and the revenue rule
//! - [`stats`] - Dashboard aggregates (per-status counts, revenue)
//! - [`validation`] - Checkout form and quantity rules
//! - [`error`] - Error enums shared by every module
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same cart in, same totals out; nothing reads a clock or a socket
//! 2. **No I/O**: Network, file system, and channel access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole rupiah (i64), never floats
//! 4. **Typed Failures**: Every refusal is an enum variant, never a string or a panic
//!
//! ## Example Usage
//!
//! ```rust
//! use toko_core::money::Rupiah;
//! use toko_core::types::ShippingMethod;
//!
//! // Whole-rupiah integers, never floats
//! let subtotal = Rupiah::new(250_000);
//!
//! // Flat shipping table
//! let shipping = ShippingMethod::Standard.cost();
//!
//! let total = subtotal + shipping;
//! assert_eq!(total.amount(), 265_000);
//! assert_eq!(total.to_string(), "Rp265.000");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod stats;
pub mod status;
pub mod types;
pub mod validation;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use toko_core::Rupiah` instead of
// `use toko_core::money::Rupiah`

pub use cart::{Cart, CartItem, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Rupiah;
pub use stats::{recent_orders, OrderStats, RecentOrder};
pub use status::{counts_toward_revenue, Actor, CustomerPaymentPolicy};
pub use types::*;
pub use weight::Grams;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a cart.
///
/// ## Why a constant?
/// The server enforces the same cap. Checking it client-side turns a
/// would-be round trip into an immediate inline error.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single cart line.
///
/// ## Why a constant?
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// The server rejects larger quantities too; this keeps the error local.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// How many rows the dashboard's recent-orders table shows.
pub const RECENT_ORDERS_LIMIT: usize = 5;
