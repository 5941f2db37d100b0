//! Authentication error types.

use thiserror::Error;

use crate::catalog::CatalogError;

/// Errors that can occur during authentication operations.
///
/// This is the only error class exposed to callers of `login`; callers that
/// only care about success may collapse it to a boolean, but the variants
/// carry enough detail for logs.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] greengrocer_core::EmailError),

    /// Invalid credentials (rejected by the catalog's login endpoint).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The issued token could not be decoded for its identity claim.
    #[error("malformed token: {0}")]
    InvalidToken(String),

    /// Network or catalog failure during login.
    #[error("catalog error: {0}")]
    Catalog(CatalogError),
}

impl From<CatalogError> for AuthError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Unauthorized => Self::InvalidCredentials,
            other => Self::Catalog(other),
        }
    }
}
