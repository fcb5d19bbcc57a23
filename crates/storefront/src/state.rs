//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use fashion_forward_core::ProductCatalog;

use crate::cart::CartStore;
use crate::config::StorefrontConfig;
use crate::error::{AppError, cart_breadcrumb};
use crate::notifications::Notifier;
use crate::storage::{FileStorage, SharedStorage};

/// The cart type held by the application.
pub type SharedCart = CartStore<SharedStorage>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the single cart; every
/// handler goes through [`AppState::cart`], which serializes cart operations.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<ProductCatalog>,
    cart: Mutex<SharedCart>,
    notifier: Arc<Notifier>,
}

impl AppState {
    /// Create application state with the cart stored under `config.storage_dir`.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let storage: SharedStorage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        Self::with_storage(config, storage)
    }

    /// Create application state over an explicit storage backend.
    ///
    /// Restores the persisted cart (an unreadable cart starts empty) and wires
    /// the toast and breadcrumb observers.
    #[must_use]
    pub fn with_storage(config: StorefrontConfig, storage: SharedStorage) -> Self {
        let catalog = Arc::new(ProductCatalog::builtin());
        let notifier = Arc::new(Notifier::new(config.toast_lifetime));

        let mut cart = CartStore::open(Arc::clone(&catalog), storage);
        cart.subscribe(notifier.cart_observer());
        cart.subscribe(cart_breadcrumb);

        tracing::info!(
            lines = cart.items().len(),
            item_count = cart.item_count(),
            "Cart ready"
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
                notifier,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &ProductCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the toast notifier.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    /// Lock the cart for one operation.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if a previous holder panicked.
    pub fn cart(&self) -> Result<MutexGuard<'_, SharedCart>, AppError> {
        self.inner
            .cart
            .lock()
            .map_err(|_| AppError::Internal("cart lock poisoned".to_string()))
    }
}
