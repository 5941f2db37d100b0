//! In-memory cart state and its mutation operations.
//!
//! The engine exclusively owns the authoritative cart. Every mutation is
//! immediately mirrored to the [`SessionStore`](crate::session::SessionStore)
//! so the cart survives reloads; persistence failures are absorbed (logged
//! at `warn`) because the in-memory state remains correct regardless.
//!
//! # Clamping
//!
//! Adding more units than the product has in stock is not an error: the
//! amount is silently capped at the stock value observed at call time. The
//! guarantee is advisory only - stock may drift between an add and a later
//! checkout, and no optimistic-concurrency check exists between the two.

use tracing::{debug, warn};

use greengrocer_core::ProductId;

use crate::models::{Cart, CartItem};
use crate::session::SessionStore;

/// Owns the cart and applies its mutation rules.
#[derive(Debug)]
pub struct CartEngine {
    cart: Cart,
    store: SessionStore,
}

impl CartEngine {
    /// Create an engine with an empty cart.
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self {
            cart: Cart::new(),
            store,
        }
    }

    /// Create an engine hydrated from the persisted cart, if one exists.
    #[must_use]
    pub fn hydrate(store: SessionStore) -> Self {
        let cart = store.load_cart();
        Self { cart, store }
    }

    /// Read-only view of the current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add units of a product to the cart.
    ///
    /// The new amount is the existing amount (zero for a fresh entry) plus
    /// `item.amount`, clamped to `item.product.stock`. A clamped add is not
    /// an error. A product with zero stock stores no entry at all.
    pub fn add_item(&mut self, item: CartItem) {
        let existing = self.cart.get(&item.product.id).map_or(0, |e| e.amount);
        let requested = existing.saturating_add(item.amount);
        let amount = requested.min(item.product.stock);

        if amount < requested {
            debug!(
                product_id = %item.product.id,
                requested,
                stock = item.product.stock,
                "cart amount clamped to available stock"
            );
        }

        self.cart.insert(CartItem::new(item.product, amount));
        self.persist();
    }

    /// Remove a product's entry entirely. No-op if absent.
    pub fn remove_item(&mut self, id: &ProductId) {
        self.cart.remove(id);
        self.persist();
    }

    /// Empty the cart and remove its persisted copy.
    pub fn clear(&mut self) {
        self.cart.clear();
        if let Err(e) = self.store.clear_cart() {
            warn!(error = %e, "failed to remove persisted cart");
        }
    }

    /// Mirror the full cart to durable storage. Failures are absorbed; the
    /// in-memory cart stays authoritative.
    fn persist(&self) {
        if let Err(e) = self.store.save_cart(&self.cart) {
            warn!(error = %e, "failed to persist cart");
        }
    }
}
