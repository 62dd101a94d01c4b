//! # Session Management
//!
//! This module owns the authenticated session: the bearer token plus the
//! signed-in user profile. Exactly two values survive a restart, and they
//! live together in one credentials file:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Session Lifecycle                          │
//! │                                                                 │
//! │   sign-in ──► SessionStore (in memory) ──► CredentialStore      │
//! │                    │                        (token + user       │
//! │                    │                         on disk, TOML)     │
//! │   restart ────────►│◄──── restore ──────────────┘               │
//! │                    │                                            │
//! │   sign-out ──► both cleared                                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Requests never go out without a session. [`SessionStore::require`]
//! surfaces [`ApiError::MissingSession`] before any network traffic, so a
//! signed-out client fails locally instead of producing a doomed request.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use toko_core::{Actor, User};

use crate::error::{ApiError, ApiResult};

/// An authenticated session: the bearer token and the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token issued by the server at sign-in.
    pub token: String,
    /// Profile of the signed-in user.
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// True when the signed-in user holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.user.role.is_admin()
    }

    /// The actor this session acts as in status transitions.
    pub fn actor(&self) -> Actor {
        Actor::from(self.user.role)
    }
}

/// Shared in-memory holder for the current session.
///
/// Cloned handles (via `Arc`) all observe the same sign-in state.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current session.
    pub async fn set(&self, session: Session) {
        let mut guard = self.current.write().await;
        *guard = Some(session);
    }

    /// Drops the current session without touching persisted credentials.
    pub async fn clear(&self) {
        *self.current.write().await = None;
    }

    /// Snapshot of the current session, if any.
    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// True when a session is held.
    pub async fn is_signed_in(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Returns the current session or [`ApiError::MissingSession`].
    ///
    /// Every endpoint wrapper calls this first, so the absence of a session
    /// never turns into network traffic.
    pub async fn require(&self) -> ApiResult<Session> {
        self.current
            .read()
            .await
            .clone()
            .ok_or(ApiError::MissingSession)
    }

    /// Loads persisted credentials into memory at startup.
    ///
    /// A missing or unreadable credentials file leaves the store signed out
    /// rather than failing startup.
    pub async fn restore_from(&self, store: &CredentialStore) {
        match store.load() {
            Ok(Some(session)) => {
                info!(user = %session.user.name, "Restored session from disk");
                self.set(session).await;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable credentials file");
            }
        }
    }

    /// Accepts a fresh session and persists it.
    pub async fn sign_in(&self, store: &CredentialStore, session: Session) -> ApiResult<()> {
        store.save(&session)?;
        info!(user = %session.user.name, "Signed in");
        self.set(session).await;
        Ok(())
    }

    /// Clears both the in-memory session and the persisted credentials.
    pub async fn sign_out(&self, store: &CredentialStore) -> ApiResult<()> {
        store.clear()?;
        self.clear().await;
        info!("Signed out");
        Ok(())
    }
}

// ==============================================================================
// Credential persistence
// ==============================================================================

/// On-disk persistence for the two durable session keys.
///
/// The file holds the token and the user profile, nothing else. Carts,
/// orders, and catalog data are server state and are never written here.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store rooted at the platform config directory.
    pub fn at_default_location() -> Option<Self> {
        default_credentials_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted session. A missing file means signed out.
    pub fn load(&self) -> ApiResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| ApiError::CredentialLoadFailed(e.to_string()))?;
        let session: Session =
            toml::from_str(&contents).map_err(|e| ApiError::CredentialLoadFailed(e.to_string()))?;
        Ok(Some(session))
    }

    /// Writes the session to disk, creating parent directories as needed.
    pub fn save(&self, session: &Session) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ApiError::CredentialSaveFailed(e.to_string()))?;
        }
        let contents = toml::to_string_pretty(session)
            .map_err(|e| ApiError::CredentialSaveFailed(e.to_string()))?;
        std::fs::write(&self.path, contents)
            .map_err(|e| ApiError::CredentialSaveFailed(e.to_string()))?;
        Ok(())
    }

    /// Removes the credentials file. Absent file is not an error.
    pub fn clear(&self) -> ApiResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::CredentialSaveFailed(e.to_string())),
        }
    }
}

/// Default credentials path: `credentials.toml` inside the platform config
/// directory, next to `client.toml`.
pub fn default_credentials_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "toko", "shop")
        .map(|dirs| dirs.config_dir().join("credentials.toml"))
}
