//! Session state shared across UI event handlers.
//!
//! [`StoreSession`] is the explicit session-state object: it owns the
//! authenticated user, the cart engine, and the current product snapshot,
//! replacing ad-hoc module-level mutable state. All mutation goes through
//! `&mut self`; the session is single-threaded by design and needs no
//! internal locking. Only checkout's spawned stock updates run
//! concurrently, and those own clones of everything they touch.

use secrecy::SecretString;
use tracing::{info, warn};

use greengrocer_core::ProductId;

use crate::cart::CartEngine;
use crate::catalog::CatalogClient;
use crate::checkout::{CheckoutCoordinator, CheckoutOutcome};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::models::{Cart, CartItem, NewProduct, Product, User};
use crate::services::auth::{AuthError, AuthService};
use crate::session::SessionStore;

/// The storefront session: user, cart, and product snapshot.
pub struct StoreSession {
    config: StorefrontConfig,
    client: CatalogClient,
    store: SessionStore,
    coordinator: CheckoutCoordinator,
    user: Option<User>,
    engine: CartEngine,
    products: Vec<Product>,
}

impl StoreSession {
    /// Initialize a session: hydrate the user and cart from durable
    /// storage and fetch the product snapshot from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if the initial product fetch fails.
    /// Persisted state never fails hydration - malformed entries are
    /// treated as absent.
    pub async fn init(config: StorefrontConfig) -> Result<Self> {
        let client = CatalogClient::new(&config);
        let store = SessionStore::new(&config.session_dir);
        let products = client.list_products().await?;

        let user = store.load_user();
        let engine = CartEngine::hydrate(store.clone());
        let coordinator = CheckoutCoordinator::new(client.clone());

        info!(
            products = products.len(),
            cart_entries = engine.cart().len(),
            restored_user = user.is_some(),
            "session initialized"
        );

        Ok(Self {
            config,
            client,
            store,
            coordinator,
            user,
            engine,
            products,
        })
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// The authenticated user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        self.engine.cart()
    }

    /// The current product snapshot.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product in the snapshot by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Authenticate against the catalog and persist the resulting user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` on rejected credentials or transport failure;
    /// this is the only error class surfaced from authentication.
    pub async fn login(
        &mut self,
        email: &str,
        password: SecretString,
    ) -> std::result::Result<&User, AuthError> {
        let auth = AuthService::new(&self.client, &self.config);
        let user = auth.login(email, password).await?;

        if let Err(e) = self.store.save_user(&user) {
            warn!(error = %e, "failed to persist user");
        }

        Ok(&*self.user.insert(user))
    }

    /// Log out: clear the user from memory and durable storage.
    ///
    /// The cart is deliberately untouched - logout tears down identity
    /// only.
    pub fn logout(&mut self) {
        self.user = None;
        if let Err(e) = self.store.clear_user() {
            warn!(error = %e, "failed to remove persisted user");
        }
    }

    // =========================================================================
    // Cart operations
    // =========================================================================

    /// Add `amount` units of a product to the cart, clamped to stock.
    ///
    /// Returns `false` (a logged no-op) when the id is not in the current
    /// snapshot.
    pub fn add_to_cart(&mut self, id: &ProductId, amount: u32) -> bool {
        let Some(product) = self.product(id).cloned() else {
            warn!(product_id = %id, "add_to_cart for unknown product, ignoring");
            return false;
        };

        self.engine.add_item(CartItem::new(product, amount));
        true
    }

    /// Remove a product's cart entry. No-op if absent.
    pub fn remove_from_cart(&mut self, id: &ProductId) {
        self.engine.remove_item(id);
    }

    /// Empty the cart and remove its persisted copy.
    pub fn clear_cart(&mut self) {
        self.engine.clear();
    }

    // =========================================================================
    // Catalog operations
    // =========================================================================

    /// Add a product to the catalog. Privileged users only.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` when no privileged user is logged in,
    /// or `AppError::Catalog` if the catalog rejects the create.
    pub async fn add_product(&mut self, product: NewProduct) -> Result<&Product> {
        if !self.user.as_ref().is_some_and(User::is_privileged) {
            return Err(AppError::Forbidden(
                "adding products requires a privileged user".to_string(),
            ));
        }

        let created = self.client.create_product(&product).await?;
        self.products.push(created);

        match self.products.last() {
            Some(created) => Ok(created),
            None => unreachable!("product was just pushed"),
        }
    }

    /// Re-fetch the product snapshot from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if the fetch fails; the previous
    /// snapshot is kept in that case.
    pub async fn refresh_products(&mut self) -> Result<()> {
        self.products = self.client.list_products().await?;
        Ok(())
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Settle the cart against the catalog.
    ///
    /// With no authenticated user this returns
    /// [`CheckoutOutcome::RequiresLogin`] and mutates nothing. Otherwise
    /// stock updates are issued fire-and-forget, the cart is cleared, and
    /// the in-memory snapshot is updated to the settled stock values.
    ///
    /// Must be called within a Tokio runtime.
    pub fn checkout(&mut self) -> CheckoutOutcome {
        let outcome =
            self.coordinator
                .checkout(self.user.as_ref(), &mut self.engine, &self.products);

        if let CheckoutOutcome::Settled { updated } = &outcome {
            for settled in updated {
                if let Some(existing) = self.products.iter_mut().find(|p| p.id == settled.id) {
                    existing.stock = settled.stock;
                }
            }
        }

        outcome
    }
}
