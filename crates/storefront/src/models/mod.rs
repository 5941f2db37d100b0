//! Domain models for the storefront.
//!
//! These types represent validated domain objects separate from wire and
//! persistence concerns.

pub mod cart;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem};
pub use product::{NewProduct, Product};
pub use user::User;
