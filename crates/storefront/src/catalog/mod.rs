//! Product catalog REST client.
//!
//! The catalog is the source of truth for products and stock - no local
//! sync, direct API calls. Product listings are cached in-memory via `moka`
//! (5-minute TTL) and invalidated on any catalog write.
//!
//! # Endpoints
//!
//! - `GET /products` - full product collection
//! - `PUT /products/{id}` - replace a product (full body)
//! - `POST /products` - create a product
//! - `POST /login` - exchange credentials for a bearer token

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use greengrocer_core::Email;

use crate::config::StorefrontConfig;
use crate::models::{NewProduct, Product};

/// Cache key for the full product listing.
const PRODUCTS_CACHE_KEY: &str = "products";

/// Listing cache time-to-live.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur when talking to the catalog server.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (transport-level).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog returned a non-success status.
    #[error("catalog returned {0}")]
    Status(StatusCode),

    /// Credentials were rejected by the login endpoint.
    #[error("credentials rejected")]
    Unauthorized,

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Login request body.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Login response body.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
}

/// Client for the product catalog API.
///
/// Cheaply cloneable via `Arc`; clones share the HTTP connection pool and
/// the listing cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, Vec<Product>>,
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(CACHE_TTL)
            .build();

        let base_url = config
            .catalog_base_url
            .as_str()
            .trim_end_matches('/')
            .to_string();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url,
                cache,
            }),
        }
    }

    /// Fetch the full product collection, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, non-success status, or
    /// malformed response body.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(products) = self.inner.cache.get(PRODUCTS_CACHE_KEY).await {
            debug!(count = products.len(), "product listing served from cache");
            return Ok(products);
        }

        let url = format!("{}/products", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let products: Vec<Product> = response.json().await?;
        debug!(count = products.len(), "product listing fetched");

        self.inner
            .cache
            .insert(PRODUCTS_CACHE_KEY.to_string(), products.clone())
            .await;

        Ok(products)
    }

    /// Replace a product in the catalog (full body), keyed by its id.
    ///
    /// Invalidates the listing cache so the next read observes the write.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, non-success status, or
    /// malformed response body.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn update_product(&self, product: &Product) -> Result<Product, CatalogError> {
        let url = format!("{}/products/{}", self.inner.base_url, product.id);
        let response = self.inner.client.put(&url).json(product).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let updated: Product = response.json().await?;
        self.inner.cache.invalidate(PRODUCTS_CACHE_KEY).await;

        Ok(updated)
    }

    /// Create a new product; the catalog assigns the id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, non-success status, or
    /// malformed response body.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, CatalogError> {
        let url = format!("{}/products", self.inner.base_url);
        let response = self.inner.client.post(&url).json(product).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let created: Product = response.json().await?;
        self.inner.cache.invalidate(PRODUCTS_CACHE_KEY).await;

        Ok(created)
    }

    /// Exchange credentials for an opaque bearer token.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unauthorized` when the credentials are
    /// rejected, and the usual transport/parse errors otherwise.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<String, CatalogError> {
        let url = format!("{}/login", self.inner.base_url);
        let body = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        };

        let response = self.inner.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if status.is_client_error() {
            return Err(CatalogError::Unauthorized);
        }
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let login: LoginResponse = response.json().await?;
        Ok(login.access_token)
    }
}
