//! Cart types.
//!
//! The cart maps product ids to [`CartItem`] entries. Every entry carries a
//! snapshot of the product as it looked when last added; the amount obeys
//! `1 <= amount <= product.stock` as of that mutation. Entries whose amount
//! would drop to zero are removed rather than stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use greengrocer_core::ProductId;

use super::product::Product;

/// A single cart entry: a product snapshot and a positive quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Snapshot of the product at the time of the last mutation.
    pub product: Product,
    /// Units selected. Always at least 1 once stored.
    pub amount: u32,
}

impl CartItem {
    /// Create a cart item for `amount` units of `product`.
    #[must_use]
    pub const fn new(product: Product, amount: u32) -> Self {
        Self { product, amount }
    }
}

/// The transient pre-checkout selection, keyed by product id.
///
/// Iteration is in key order, which is deterministic; checkout processes
/// entries independently, so ordering carries no correctness significance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<ProductId, CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up the entry for a product, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.get(id)
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &CartItem)> {
        self.items.iter()
    }

    /// Insert or replace an entry. Amount 0 removes the key instead; zero
    /// quantities are never stored.
    pub fn insert(&mut self, item: CartItem) {
        if item.amount == 0 {
            self.items.remove(&item.product.id);
        } else {
            self.items.insert(item.product.id.clone(), item);
        }
    }

    /// Remove the entry for a product. Returns the removed item, if any.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartItem> {
        self.items.remove(id)
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = (&'a ProductId, &'a CartItem);
    type IntoIter = std::collections::btree_map::Iter<'a, ProductId, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
