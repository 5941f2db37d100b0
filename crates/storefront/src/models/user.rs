//! User domain types.

use serde::{Deserialize, Serialize};

use greengrocer_core::{AccessLevel, Email};

/// An authenticated storefront user.
///
/// Built once at login from the decoded token's identity claims and
/// immutable for the rest of the session. The token itself stays opaque;
/// only the identity claim is ever decoded from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User's email address, taken from the token's identity claim.
    pub email: Email,
    /// Opaque bearer token issued by the catalog's auth endpoint.
    pub token: String,
    /// Privilege tier derived at login.
    #[serde(rename = "accessLevel")]
    pub access_level: AccessLevel,
}

impl User {
    /// Whether this user may add products to the catalog.
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        self.access_level.is_privileged()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wire_format() {
        let user = User {
            email: Email::parse("admin@example.com").unwrap(),
            token: "opaque-token".to_string(),
            access_level: AccessLevel::Privileged,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"accessLevel\":0"));

        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
        assert!(back.is_privileged());
    }
}
