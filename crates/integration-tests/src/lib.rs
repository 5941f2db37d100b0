//! Integration tests for Greengrocer.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a catalog server (json-server style REST API) on port 3001
//! # with /products and /login routes, then:
//! CATALOG_BASE_URL=http://localhost:3001 cargo test -p greengrocer-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `session_lifecycle` - Session init, login, and cart persistence
//!   against a live catalog
//!
//! Tests that require a running catalog are `#[ignore]`d so the default
//! `cargo test` run stays hermetic.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use greengrocer_storefront::config::StorefrontConfig;

/// Base URL for the catalog server (configurable via environment).
#[must_use]
pub fn catalog_base_url() -> String {
    std::env::var("CATALOG_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// A unique session directory under the system temp dir, so parallel tests
/// never share persisted state.
#[must_use]
pub fn unique_session_dir() -> PathBuf {
    std::env::temp_dir().join(format!("greengrocer-it-{}", uuid::Uuid::new_v4()))
}

/// Build a config pointing at the live catalog with an isolated session dir.
///
/// # Panics
///
/// Panics if the configured base URL does not parse.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig::new(&catalog_base_url(), unique_session_dir(), vec![])
        .expect("invalid CATALOG_BASE_URL")
}
