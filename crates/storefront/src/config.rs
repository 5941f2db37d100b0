//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_BASE_URL` - Base URL of the product catalog server
//!   (e.g., <http://localhost:3001>)
//!
//! ## Optional
//! - `STOREFRONT_SESSION_DIR` - Directory for durable session state
//!   (default: `.greengrocer-session`)
//! - `STOREFRONT_PRIVILEGED_EMAILS` - Comma-separated emails granted the
//!   privileged access level when the token carries no role claim

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use greengrocer_core::Email;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the product catalog server.
    pub catalog_base_url: Url,
    /// Directory where durable session state (user, cart) is stored.
    pub session_dir: PathBuf,
    /// Emails granted [`AccessLevel::Privileged`] when the decoded token
    /// carries no role claim.
    ///
    /// [`AccessLevel::Privileged`]: greengrocer_core::AccessLevel::Privileged
    pub privileged_emails: Vec<Email>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog_base_url = get_required_env("CATALOG_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), e.to_string())
            })?;
        let session_dir =
            PathBuf::from(get_env_or_default("STOREFRONT_SESSION_DIR", ".greengrocer-session"));
        let privileged_emails =
            parse_email_list(&get_env_or_default("STOREFRONT_PRIVILEGED_EMAILS", ""))?;

        Ok(Self {
            catalog_base_url,
            session_dir,
            privileged_emails,
        })
    }

    /// Build a configuration directly, bypassing the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the catalog base URL does not parse.
    pub fn new(
        catalog_base_url: &str,
        session_dir: impl Into<PathBuf>,
        privileged_emails: Vec<Email>,
    ) -> Result<Self, ConfigError> {
        let catalog_base_url = catalog_base_url.parse::<Url>().map_err(|e| {
            ConfigError::InvalidEnvVar("catalog_base_url".to_string(), e.to_string())
        })?;
        Ok(Self {
            catalog_base_url,
            session_dir: session_dir.into(),
            privileged_emails,
        })
    }

    /// Whether the given email is on the configured privileged list.
    #[must_use]
    pub fn is_privileged_email(&self, email: &Email) -> bool {
        self.privileged_emails.contains(email)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a comma-separated list of email addresses, skipping blanks.
fn parse_email_list(raw: &str) -> Result<Vec<Email>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Email::parse(s).map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "STOREFRONT_PRIVILEGED_EMAILS".to_string(),
                    format!("{s}: {e}"),
                )
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email_list_empty() {
        assert!(parse_email_list("").unwrap().is_empty());
        assert!(parse_email_list(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_email_list_multiple() {
        let emails = parse_email_list("admin@example.com, ops@example.com").unwrap();
        assert_eq!(emails.len(), 2);
        assert_eq!(emails[0].as_str(), "admin@example.com");
    }

    #[test]
    fn test_parse_email_list_invalid() {
        assert!(parse_email_list("not-an-email").is_err());
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let result = StorefrontConfig::new("not a url", "/tmp/session", vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_privileged_email() {
        let admin = Email::parse("admin@example.com").unwrap();
        let config =
            StorefrontConfig::new("http://localhost:3001", "/tmp/session", vec![admin.clone()])
                .unwrap();

        assert!(config.is_privileged_email(&admin));
        assert!(!config.is_privileged_email(&Email::parse("user@example.com").unwrap()));
    }
}
