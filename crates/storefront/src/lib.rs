//! Greengrocer Storefront client library.
//!
//! A storefront client that lists products, maintains a per-session shopping
//! cart, authenticates a user, and reconciles cart contents against product
//! inventory at checkout.
//!
//! # Architecture
//!
//! - [`catalog`] - REST client for the external product catalog
//! - [`session`] - Durable key/value persistence of the user and cart
//! - [`cart`] - In-memory cart state and its mutation operations
//! - [`checkout`] - Settles cart quantities against catalog stock
//! - [`state`] - The session-state facade tying the pieces together
//!
//! The catalog is the source of truth for products and stock; this crate
//! only reads products and requests stock updates at checkout. The cart is
//! owned in memory and mirrored to durable storage after every mutation so
//! it survives process restarts.
//!
//! # Example
//!
//! ```rust,ignore
//! use greengrocer_storefront::config::StorefrontConfig;
//! use greengrocer_storefront::state::StoreSession;
//!
//! let config = StorefrontConfig::from_env()?;
//! let mut session = StoreSession::init(config).await?;
//!
//! session.login("user@example.com", "hunter2".into()).await?;
//! session.add_to_cart(&product_id, 2);
//! let outcome = session.checkout().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
pub mod telemetry;
