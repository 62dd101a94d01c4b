//! # toko-sync: Cart and Order Coordination for the Toko Storefront Client
//!
//! This crate keeps the client's view of the shop in step with the server.
//! It owns the cart mirror, the checkout transition, the order desks, and
//! the dashboard loader, and it notifies the UI through an in-process
//! broadcast bus.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Synchronization Layer                               │
//! │                                                                         │
//! │   UI surfaces (badge, cart page, checkout, orders, dashboard)           │
//! │        ▲                                │                               │
//! │        │ CartEvent via CartBus          │ calls                         │
//! │        │                                ▼                               │
//! │  ┌─────┴──────────┐  ┌──────────┐  ┌───────────┐  ┌───────────┐         │
//! │  │CartSynchronizer│  │ Checkout │  │ OrderDesk │  │ Dashboard │         │
//! │  │                │  │          │  │ AdminDesk │  │           │         │
//! │  │ server-owned   │  │ cart →   │  │           │  │ 3 sources │         │
//! │  │ mirror +       │  │ order +  │  │ ownership │  │ joined,   │         │
//! │  │ per-item locks │  │ receipt  │  │ + status  │  │ all-or-   │         │
//! │  │                │  │ handoff  │  │ gates     │  │ nothing   │         │
//! │  └───────┬────────┘  └────┬─────┘  └─────┬─────┘  └─────┬─────┘         │
//! │          │                │              │              │               │
//! │          ▼                ▼              ▼              ▼               │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │        CartBackend / OrderBackend / StatsBackend traits         │    │
//! │  │        production: Api* adapters over toko-api                  │    │
//! │  │        tests: in-memory fakes, no server needed                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │  GUARANTEES:                                                            │
//! │  • Mutations are server-first: the mirror only changes after the        │
//! │    server accepted the change                                           │
//! │  • Exactly one CartEvent per successful mutation, none on failure       │
//! │  • Same-item mutations are serialized, distinct items run concurrently  │
//! │  • Local gates (session, role, ownership, transition tables) refuse     │
//! │    doomed requests before any traffic                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - Trait seams over `toko-api` plus the production adapters
//! - [`cart`] - `CartSynchronizer`, the server-owned cart mirror
//! - [`checkout`] - Cart-to-order transition and the receipt handoff
//! - [`dashboard`] - Concurrent three-source dashboard aggregation
//! - [`error`] - Sync error type folding API and business-rule failures
//! - [`orders`] - Customer and admin order desks
//! - [`signal`] - `CartBus` broadcast channel and `CartEvent`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use toko_api::{ApiConfig, Backend, CartApi, SessionStore};
//! use toko_sync::{ApiCartBackend, CartEvent, CartSynchronizer};
//!
//! let config = ApiConfig::load_or_default(None);
//! let backend = Arc::new(Backend::new(&config)?);
//! let sessions = Arc::new(SessionStore::new());
//!
//! let cart = Arc::new(CartSynchronizer::new(Arc::new(ApiCartBackend::new(
//!     CartApi::new(backend.clone()),
//!     sessions.clone(),
//! ))));
//!
//! // Badge task: repaint on every cart signal.
//! let mut signals = cart.subscribe();
//! tokio::spawn(async move {
//!     while let Ok(event) = signals.recv().await {
//!         if !matches!(event, CartEvent::OrderPlaced { .. }) {
//!             repaint_badge().await;
//!         }
//!     }
//! });
//!
//! cart.add_item("product-1", 2).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod cart;
pub mod checkout;
pub mod dashboard;
pub mod error;
pub mod orders;
pub mod signal;

// =============================================================================
// Re-exports
// =============================================================================

// Backend seams and production adapters
pub use backend::{
    ApiCartBackend, ApiOrderBackend, ApiStatsBackend, CartBackend, OrderBackend, StatsBackend,
};

// Cart coordination
pub use cart::CartSynchronizer;
pub use signal::{CartBus, CartEvent, SIGNAL_BUFFER};

// Checkout and orders
pub use checkout::{Checkout, CheckoutSummary, OrderReceipt, ReceiptHandoff};
pub use orders::{AdminDesk, OrderDesk};

// Dashboard
pub use dashboard::{Dashboard, DashboardSnapshot};

// Errors
pub use error::{SyncError, SyncResult};
