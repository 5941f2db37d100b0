//! Unified error handling.
//!
//! Concern-level errors (`CatalogError`, `AuthError`, `SessionStoreError`)
//! are unified into `AppError` at the session facade. Most internal errors
//! never reach this type: cart-mutation and persistence failures are
//! absorbed where they occur, and authentication failures stay `AuthError`
//! at the `login` call site.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::session::SessionStoreError;

/// Application-level error type for the storefront facade.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Session persistence failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionStoreError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Operation requires a privilege the current user lacks.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
