//! Access level derived from the authenticated identity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Coarse privilege tier for a logged-in user.
///
/// Serialized as the numeric wire value the catalog's auth layer uses:
/// `0` for privileged, `1` for regular customers. Derived once at login
/// from the token's identity claims; immutable for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum AccessLevel {
    /// May add products to the catalog.
    Privileged,
    /// Regular customer.
    Customer,
}

impl AccessLevel {
    /// Whether this level permits catalog writes (adding products).
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Privileged)
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Privileged => write!(f, "privileged"),
            Self::Customer => write!(f, "customer"),
        }
    }
}

impl From<AccessLevel> for u8 {
    fn from(level: AccessLevel) -> Self {
        match level {
            AccessLevel::Privileged => 0,
            AccessLevel::Customer => 1,
        }
    }
}

/// Error converting a wire value into an [`AccessLevel`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid access level: {0} (expected 0 or 1)")]
pub struct InvalidAccessLevel(pub u8);

impl TryFrom<u8> for AccessLevel {
    type Error = InvalidAccessLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Privileged),
            1 => Ok(Self::Customer),
            other => Err(InvalidAccessLevel(other)),
        }
    }
}
