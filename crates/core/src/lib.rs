//! Greengrocer Core - Shared types library.
//!
//! This crate provides common types used across all Greengrocer components:
//! - `storefront` - The storefront client library (cart, checkout, catalog)
//! - `integration-tests` - End-to-end tests against a live catalog server
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and access levels

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
