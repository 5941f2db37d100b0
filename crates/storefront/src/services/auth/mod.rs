//! Authentication service.
//!
//! Exchanges credentials for a bearer token via the catalog's login
//! endpoint and derives the session [`User`] from the token's identity
//! claim. The token is otherwise opaque: its payload is decoded for the
//! identity only, with no signature verification - the catalog, not this
//! client, is the authority on token validity.

mod error;

pub use error::AuthError;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use secrecy::SecretString;
use serde::Deserialize;
use tracing::{info, instrument};

use greengrocer_core::{AccessLevel, Email};

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::models::User;

/// Identity claims decoded from the token payload.
#[derive(Debug, Deserialize)]
struct Claims {
    /// Identity claim: the authenticated email.
    email: Option<String>,
    /// Optional explicit role claim ("admin" grants the privileged level).
    role: Option<String>,
}

/// Authentication service.
pub struct AuthService<'a> {
    client: &'a CatalogClient,
    config: &'a StorefrontConfig,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(client: &'a CatalogClient, config: &'a StorefrontConfig) -> Self {
        Self { client, config }
    }

    /// Login with email and password.
    ///
    /// On success the returned [`User`] carries the opaque token and the
    /// access level derived from the token's role claim, falling back to
    /// the configured privileged-email list.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the catalog rejects the
    /// credentials, `AuthError::InvalidToken` if the issued token has no
    /// decodable identity claim, and `AuthError::Catalog` on transport
    /// failure.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: SecretString) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        let token = self.client.login(&email, &password).await?;

        let claims = decode_claims(&token)?;
        let identity = claims
            .email
            .as_deref()
            .map(Email::parse)
            .transpose()?
            .ok_or_else(|| AuthError::InvalidToken("missing identity claim".to_string()))?;

        let access_level = derive_access_level(claims.role.as_deref(), &identity, self.config);
        info!(email = %identity, %access_level, "login succeeded");

        Ok(User {
            email: identity,
            token,
            access_level,
        })
    }
}

/// Decode the claims from a JWT-shaped token without verifying it.
fn decode_claims(token: &str) -> Result<Claims, AuthError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| AuthError::InvalidToken("token is not dot-delimited".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| AuthError::InvalidToken(format!("payload is not base64url: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::InvalidToken(format!("payload is not JSON: {e}")))
}

/// Derive the access level from an explicit role claim when present,
/// otherwise from the configured privileged-email list.
fn derive_access_level(
    role: Option<&str>,
    email: &Email,
    config: &StorefrontConfig,
) -> AccessLevel {
    match role {
        Some("admin") => AccessLevel::Privileged,
        Some(_) => AccessLevel::Customer,
        None if config.is_privileged_email(email) => AccessLevel::Privileged,
        None => AccessLevel::Customer,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Build an unsigned JWT-shaped token with the given JSON payload.
    fn fake_token(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
        format!("{header}.{body}.sig")
    }

    fn config_with_admins(admins: &[&str]) -> StorefrontConfig {
        let emails = admins.iter().map(|e| Email::parse(e).unwrap()).collect();
        StorefrontConfig::new("http://localhost:3001", "/tmp/unused", emails).unwrap()
    }

    #[test]
    fn test_decode_claims() {
        let token = fake_token(&serde_json::json!({
            "email": "user@example.com",
            "iat": 1_700_000_000,
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.email.as_deref(), Some("user@example.com"));
        assert!(claims.role.is_none());
    }

    #[test]
    fn test_decode_claims_with_role() {
        let token = fake_token(&serde_json::json!({
            "email": "ops@example.com",
            "role": "admin",
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_decode_rejects_opaque_token() {
        assert!(matches!(
            decode_claims("not-a-jwt"),
            Err(AuthError::InvalidToken(_))
        ));
        assert!(matches!(
            decode_claims("a.!!!not-base64!!!.c"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_role_claim_wins_over_email_list() {
        let config = config_with_admins(&[]);
        let email = Email::parse("ops@example.com").unwrap();

        assert_eq!(
            derive_access_level(Some("admin"), &email, &config),
            AccessLevel::Privileged
        );
        assert_eq!(
            derive_access_level(Some("customer"), &email, &config),
            AccessLevel::Customer
        );
    }

    #[test]
    fn test_email_list_fallback() {
        let config = config_with_admins(&["admin@example.com"]);

        assert_eq!(
            derive_access_level(None, &Email::parse("admin@example.com").unwrap(), &config),
            AccessLevel::Privileged
        );
        assert_eq!(
            derive_access_level(None, &Email::parse("user@example.com").unwrap(), &config),
            AccessLevel::Customer
        );
    }
}
