//! # toko-api: REST Client for the Toko Storefront
//!
//! This crate is the only place the client touches the network. It speaks
//! the storefront's JSON-over-HTTP contract and returns the pure types
//! from `toko-core`.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         toko-api Layers                                 │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐                   │
//! │  │   CartApi    │  │   OrderApi   │  │   CollabApi  │                   │
//! │  │              │  │              │  │              │                   │
//! │  │ fetch / add  │  │ place / list │  │ user count   │                   │
//! │  │ update /     │  │ view / pay   │  │ product count│                   │
//! │  │ remove /     │  │ admin ops    │  │ (dashboard)  │                   │
//! │  │ clear / count│  │              │  │              │                   │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘                   │
//! │         │                 │                 │                           │
//! │         └────────────┬────┴─────────────────┘                           │
//! │                      ▼                                                  │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                        Backend (http.rs)                        │    │
//! │  │                                                                 │    │
//! │  │  shared reqwest::Client + base URL                              │    │
//! │  │  bearer auth from Session, request-id logging,                  │    │
//! │  │  status mapping, envelope decoding                              │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │  SessionStore (in memory) ◄──► CredentialStore (token + user on disk)   │
//! │  ApiConfig (client.toml + TOKO_* environment overrides)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`cart`] - Cart endpoint wrappers
//! - [`collab`] - User/product totals for the dashboard
//! - [`config`] - TOML configuration with environment overrides
//! - [`envelope`] - The `{success, message, ...payload}` response shape
//! - [`error`] - `ApiError` and the `ApiResult` alias
//! - [`http`] - Shared transport (reqwest client, bearer auth, decoding)
//! - [`order`] - Order endpoint wrappers (customer + admin)
//! - [`session`] - Session holder and credential persistence
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use toko_api::{ApiConfig, Backend, CartApi, CredentialStore, SessionStore};
//!
//! let config = ApiConfig::load_or_default(None);
//! let backend = Arc::new(Backend::new(&config)?);
//!
//! let sessions = Arc::new(SessionStore::new());
//! if let Some(store) = CredentialStore::at_default_location() {
//!     sessions.restore_from(&store).await;
//! }
//!
//! let cart = CartApi::new(backend.clone());
//! let current = cart.fetch(&sessions.require().await?).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod collab;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod order;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::{CartApi, CartLineRequest, RemoveItemRequest};
pub use collab::CollabApi;
pub use config::{ApiConfig, ApiSettings, StorefrontSettings};
pub use envelope::{Ack, Envelope};
pub use error::{ApiError, ApiResult};
pub use http::Backend;
pub use order::{AdminUpdateRequest, OrderApi, PlaceOrderRequest, UpdatePaymentRequest};
pub use session::{default_credentials_path, CredentialStore, Session, SessionStore};
