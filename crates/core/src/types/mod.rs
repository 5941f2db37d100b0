//! Core types for Greengrocer.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod access;
pub mod email;
pub mod id;

pub use access::{AccessLevel, InvalidAccessLevel};
pub use email::{Email, EmailError};
pub use id::ProductId;
