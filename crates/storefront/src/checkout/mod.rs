//! Checkout: settles cart quantities against catalog stock.
//!
//! Settlement is split into a pure computation ([`settle`]) and the side
//! effects the coordinator layers on top: one `PUT` per updated product,
//! issued fire-and-forget, followed by an unconditional cart clear.
//!
//! # Failure semantics
//!
//! Stock updates are best-effort by design: the coordinator does not await
//! confirmation before clearing the cart, a failed update for one product
//! does not block or roll back the others, and a lost update is observable
//! only through a `warn` log. A caller inspecting state right after
//! checkout may see an emptied cart before all stock updates have landed.

use tracing::{info, warn};

use crate::cart::CartEngine;
use crate::catalog::CatalogClient;
use crate::models::{Cart, Product, User};

/// The result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// No authenticated user; the caller should redirect to login.
    /// Nothing was mutated.
    RequiresLogin,
    /// The cart was settled and cleared.
    Settled {
        /// Products with their post-checkout stock values, in cart order.
        updated: Vec<Product>,
    },
}

/// Compute post-checkout stock levels.
///
/// For each catalog product with a cart entry, decrement its stock by the
/// cart amount and collect it. Products without a cart entry are untouched
/// and not returned. The decrement saturates at zero: the cart invariant
/// caps each amount at the stock snapshot it was clamped against, but the
/// catalog may have drifted since.
#[must_use]
pub fn settle(cart: &Cart, products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter_map(|product| {
            cart.get(&product.id).map(|entry| {
                let mut updated = product.clone();
                updated.stock = updated.stock.saturating_sub(entry.amount);
                updated
            })
        })
        .collect()
}

/// Drives checkout against the catalog.
#[derive(Clone)]
pub struct CheckoutCoordinator {
    client: CatalogClient,
}

impl CheckoutCoordinator {
    /// Create a coordinator over the given catalog client.
    #[must_use]
    pub const fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    /// Settle the cart against the catalog snapshot.
    ///
    /// Refused with [`CheckoutOutcome::RequiresLogin`] when no user is
    /// authenticated. Otherwise issues one fire-and-forget stock update per
    /// cart entry, clears the cart unconditionally, and returns the updated
    /// products.
    ///
    /// Must be called within a Tokio runtime; the stock updates run as
    /// spawned tasks that outlive this call.
    pub fn checkout(
        &self,
        user: Option<&User>,
        engine: &mut CartEngine,
        products: &[Product],
    ) -> CheckoutOutcome {
        let Some(user) = user else {
            return CheckoutOutcome::RequiresLogin;
        };

        let updated = settle(engine.cart(), products);

        for product in &updated {
            let client = self.client.clone();
            let product = product.clone();
            tokio::spawn(async move {
                if let Err(e) = client.update_product(&product).await {
                    warn!(
                        product_id = %product.id,
                        error = %e,
                        "stock update lost during checkout"
                    );
                }
            });
        }

        info!(
            email = %user.email,
            products = updated.len(),
            "checkout settled, clearing cart"
        );
        engine.clear();

        CheckoutOutcome::Settled { updated }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::models::CartItem;
    use crate::models::product::test_support::sample_product;
    use crate::session::SessionStore;
    use greengrocer_core::{AccessLevel, Email};

    fn temp_engine() -> CartEngine {
        let dir = std::env::temp_dir().join(format!("greengrocer-test-{}", uuid::Uuid::new_v4()));
        CartEngine::new(SessionStore::new(dir))
    }

    /// A coordinator whose catalog is unreachable; background updates fail
    /// and are absorbed, which is exactly the documented behavior.
    fn offline_coordinator() -> CheckoutCoordinator {
        let config = StorefrontConfig::new("http://127.0.0.1:9", "/tmp/unused", vec![]).unwrap();
        CheckoutCoordinator::new(CatalogClient::new(&config))
    }

    fn customer() -> User {
        User {
            email: Email::parse("user@example.com").unwrap(),
            token: "token".to_string(),
            access_level: AccessLevel::Customer,
        }
    }

    #[test]
    fn test_settle_decrements_stock() {
        let p1 = sample_product("p1", 5);
        let p2 = sample_product("p2", 1);
        let mut cart = Cart::new();
        cart.insert(CartItem::new(p1.clone(), 2));
        cart.insert(CartItem::new(p2.clone(), 1));

        let updated = settle(&cart, &[p1, p2]);

        let stocks: Vec<(&str, u32)> = updated
            .iter()
            .map(|p| (p.id.as_str(), p.stock))
            .collect();
        assert_eq!(stocks, vec![("p1", 3), ("p2", 0)]);
    }

    #[test]
    fn test_settle_skips_products_not_in_cart() {
        let in_cart = sample_product("p1", 5);
        let not_in_cart = sample_product("p2", 7);
        let mut cart = Cart::new();
        cart.insert(CartItem::new(in_cart.clone(), 1));

        let updated = settle(&cart, &[in_cart, not_in_cart]);

        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].id.as_str(), "p1");
    }

    #[test]
    fn test_settle_saturates_on_drifted_stock() {
        // Stock dropped to 1 after the cart clamped against 5
        let mut snapshot = sample_product("p1", 5);
        let mut cart = Cart::new();
        cart.insert(CartItem::new(snapshot.clone(), 3));
        snapshot.stock = 1;

        let updated = settle(&cart, &[snapshot]);

        assert_eq!(updated[0].stock, 0);
    }

    #[tokio::test]
    async fn test_checkout_without_user_is_refused() {
        let coordinator = offline_coordinator();
        let mut engine = temp_engine();
        let product = sample_product("p1", 5);
        engine.add_item(CartItem::new(product.clone(), 2));

        let outcome = coordinator.checkout(None, &mut engine, &[product.clone()]);

        assert_eq!(outcome, CheckoutOutcome::RequiresLogin);
        // No mutation: cart is unchanged
        assert_eq!(engine.cart().get(&product.id).unwrap().amount, 2);
    }

    #[tokio::test]
    async fn test_checkout_settles_and_clears_cart() {
        let coordinator = offline_coordinator();
        let mut engine = temp_engine();
        let p1 = sample_product("p1", 5);
        let p2 = sample_product("p2", 1);
        engine.add_item(CartItem::new(p1.clone(), 2));
        engine.add_item(CartItem::new(p2.clone(), 1));

        let outcome = coordinator.checkout(Some(&customer()), &mut engine, &[p1, p2]);

        let CheckoutOutcome::Settled { updated } = outcome else {
            panic!("expected settled outcome");
        };
        let stocks: Vec<u32> = updated.iter().map(|p| p.stock).collect();
        assert_eq!(stocks, vec![3, 0]);
        assert!(engine.cart().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_settles_nothing() {
        let coordinator = offline_coordinator();
        let mut engine = temp_engine();

        let outcome =
            coordinator.checkout(Some(&customer()), &mut engine, &[sample_product("p1", 5)]);

        assert_eq!(outcome, CheckoutOutcome::Settled { updated: vec![] });
    }
}
