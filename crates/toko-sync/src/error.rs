//! Error type for the synchronization layer.
//!
//! Failures come from two directions: the HTTP layer ([`ApiError`]) and the
//! business rules ([`CoreError`]). Both pass through unchanged so callers
//! keep the original message and can still ask category questions.

use thiserror::Error;

use toko_api::ApiError;
use toko_core::{CoreError, ValidationError};

/// Convenient Result alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// All errors the synchronization layer can surface.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Failure while talking to the storefront backend.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A business rule rejected the operation before any request went out.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SyncError {
    /// True when the caller should route to the sign-in screen.
    pub fn requires_login(&self) -> bool {
        matches!(self, SyncError::Api(api) if api.requires_login())
    }

    /// True when user input was rejected locally and no request was sent.
    pub fn is_validation(&self) -> bool {
        match self {
            SyncError::Api(api) => api.is_validation(),
            SyncError::Core(CoreError::Validation(_)) => true,
            SyncError::Core(_) => false,
        }
    }

    /// True when the failure happened below the application protocol.
    pub fn is_network(&self) -> bool {
        matches!(self, SyncError::Api(api) if api.is_network())
    }

    /// True when the server processed the request and said no.
    pub fn is_rejection(&self) -> bool {
        matches!(self, SyncError::Api(api) if api.is_rejection())
    }
}

impl From<ValidationError> for SyncError {
    fn from(err: ValidationError) -> Self {
        SyncError::Core(CoreError::Validation(err))
    }
}
