//! Cart state management.
//!
//! [`CartStore`] owns the cart's line items, persists them after every
//! mutation, and tells registered observers what changed.
//!
//! # Failure policy
//!
//! The store is fail-soft. A cart that cannot be loaded opens empty, and a
//! cart that cannot be saved keeps working in memory for the rest of the
//! process. Both cases are logged; neither reaches the shopper.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fashion_forward_core::{ProductCatalog, ProductId};
//! use fashion_forward_storefront::cart::CartStore;
//! use fashion_forward_storefront::storage::MemoryStorage;
//!
//! let mut cart = CartStore::open(Arc::new(ProductCatalog::builtin()), MemoryStorage::new());
//! assert!(cart.add_item(ProductId::new(1), 2));
//! assert!(!cart.add_item(ProductId::new(42), 1));
//! assert_eq!(cart.item_count(), 2);
//! ```

use std::sync::Arc;

use fashion_forward_core::{CartLineItem, Price, ProductCatalog, ProductId};
use tracing::instrument;

mod repository;

pub use repository::{CART_STORAGE_KEY, CartRepository, CartStorageError};

use crate::storage::KeyValueStorage;

/// What a mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Units of a product were added.
    ItemAdded {
        product_id: ProductId,
        name: String,
        added: u32,
        line_quantity: u32,
    },
    /// A product's line was removed. `was_present` is false for absent ids.
    ItemRemoved {
        product_id: ProductId,
        was_present: bool,
    },
    /// A line's quantity was set.
    QuantityUpdated {
        product_id: ProductId,
        quantity: u32,
    },
    /// Every line was removed.
    Cleared,
}

impl CartEvent {
    /// Transient notification text for this event, if it shows one.
    #[must_use]
    pub fn toast(&self) -> Option<String> {
        match self {
            Self::ItemAdded { name, .. } => Some(format!("{name} added to cart!")),
            Self::ItemRemoved { .. } => Some("Item removed from cart".to_string()),
            Self::QuantityUpdated { .. } | Self::Cleared => None,
        }
    }
}

/// A mutation together with the cart's derived values after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartChange {
    pub event: CartEvent,
    pub item_count: u64,
    pub total: Price,
}

/// Callback run after each cart mutation.
pub type CartObserver = Box<dyn Fn(&CartChange) + Send + Sync>;

/// The authoritative cart.
///
/// Holds at most one line per product id, each with quantity at least 1, in
/// the order products were first added.
pub struct CartStore<S> {
    catalog: Arc<ProductCatalog>,
    repository: CartRepository<S>,
    items: Vec<CartLineItem>,
    observers: Vec<CartObserver>,
}

impl<S> std::fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Create an empty store without reading storage.
    ///
    /// Call [`load`](Self::load) to restore a persisted cart.
    #[must_use]
    pub const fn new(catalog: Arc<ProductCatalog>, storage: S) -> Self {
        Self {
            catalog,
            repository: CartRepository::new(storage),
            items: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Create a store and restore the persisted cart, falling back to an
    /// empty cart if it cannot be loaded.
    #[must_use]
    pub fn open(catalog: Arc<ProductCatalog>, storage: S) -> Self {
        let mut store = Self::new(catalog, storage);
        match store.load() {
            Ok(lines) => tracing::debug!(lines, "Cart restored"),
            Err(e) => tracing::warn!(error = %e, "Failed to load cart, starting empty"),
        }
        store
    }

    /// Replace the in-memory cart with the persisted one.
    ///
    /// Returns the number of lines restored. On error the cart is left empty.
    ///
    /// # Errors
    ///
    /// Returns `CartStorageError` if storage cannot be read or holds a corrupt cart.
    pub fn load(&mut self) -> Result<usize, CartStorageError> {
        self.items.clear();
        self.items = self.repository.load()?;
        Ok(self.items.len())
    }

    /// Write the current cart to storage.
    ///
    /// # Errors
    ///
    /// Returns `CartStorageError` if the write fails. The in-memory cart is unaffected.
    pub fn save(&self) -> Result<(), CartStorageError> {
        self.repository.save(&self.items)
    }

    /// Register a callback run after every mutation.
    pub fn subscribe(&mut self, observer: impl Fn(&CartChange) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Add `quantity` units of a catalog product.
    ///
    /// Increments the existing line or appends a snapshot of the product.
    /// A quantity of 0 adds one unit. Returns `false` without touching the
    /// cart if the product is not in the catalog.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn add_item(&mut self, product_id: ProductId, quantity: u32) -> bool {
        let catalog = Arc::clone(&self.catalog);
        let Some(product) = catalog.get(product_id) else {
            tracing::debug!("Ignoring add of unknown product");
            return false;
        };
        let added = quantity.max(1);
        let name = product.name.clone();

        let line_quantity = if let Some(line) = self.line_mut(product_id) {
            line.quantity = line.quantity.saturating_add(added);
            line.quantity
        } else {
            let line = CartLineItem::new(product, added);
            let quantity = line.quantity;
            self.items.push(line);
            quantity
        };

        self.commit(CartEvent::ItemAdded {
            product_id,
            name,
            added,
            line_quantity,
        });
        true
    }

    /// Remove a product's line. Absent ids leave the cart unchanged.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_item(&mut self, product_id: ProductId) {
        let before = self.items.len();
        self.items.retain(|line| line.id() != product_id);
        let was_present = self.items.len() != before;

        self.commit(CartEvent::ItemRemoved {
            product_id,
            was_present,
        });
    }

    /// Set a line's quantity, raising anything below 1 to 1.
    ///
    /// Never removes the line; use [`remove_item`](Self::remove_item) for that.
    /// Does nothing if the product is not in the cart.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        let Some(line) = self.line_mut(product_id) else {
            return;
        };
        let quantity = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
        line.quantity = quantity;

        self.commit(CartEvent::QuantityUpdated {
            product_id,
            quantity,
        });
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit(CartEvent::Cleared);
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Total units in the cart (not distinct lines).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Lines in first-added order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|line| line.id() == product_id)
    }

    /// Persist, then notify observers.
    fn commit(&self, event: CartEvent) {
        if let Err(e) = self.save() {
            tracing::error!(error = %e, "Failed to save cart, continuing in memory");
        }

        let change = CartChange {
            event,
            item_count: self.item_count(),
            total: self.total(),
        };
        tracing::info!(
            event = ?change.event,
            item_count = change.item_count,
            total = change.total.amount(),
            "Cart updated"
        );
        for observer in &self.observers {
            observer(&change);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Mutex;

    use proptest::prelude::*;

    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    fn store() -> CartStore<Arc<MemoryStorage>> {
        CartStore::open(
            Arc::new(ProductCatalog::builtin()),
            Arc::new(MemoryStorage::new()),
        )
    }

    fn line<S: KeyValueStorage>(cart: &CartStore<S>, id: ProductId) -> Option<&CartLineItem> {
        cart.items().iter().find(|line| line.id() == id)
    }

    fn pairs<S: KeyValueStorage>(cart: &CartStore<S>) -> Vec<(u32, u32)> {
        cart.items()
            .iter()
            .map(|line| (line.id().as_u32(), line.quantity))
            .collect()
    }

    const TEE: ProductId = ProductId::new(1);
    const BLACK: ProductId = ProductId::new(2);
    const GRAPHIC: ProductId = ProductId::new(3);

    #[test]
    fn test_repeated_adds_share_one_line() {
        let mut cart = store();
        assert!(cart.add_item(TEE, 1));
        assert!(cart.add_item(TEE, 3));
        assert!(cart.add_item(TEE, 1));

        assert_eq!(pairs(&cart), vec![(1, 5)]);
    }

    #[test]
    fn test_add_unknown_product_changes_nothing() {
        let mut cart = store();
        cart.add_item(BLACK, 2);
        let before = cart.items().to_vec();

        assert!(!cart.add_item(ProductId::new(999), 1));

        assert_eq!(cart.items(), before.as_slice());
    }

    #[test]
    fn test_add_zero_adds_one() {
        let mut cart = store();
        assert!(cart.add_item(TEE, 0));
        assert_eq!(pairs(&cart), vec![(1, 1)]);
    }

    #[test]
    fn test_add_snapshots_product() {
        let mut cart = store();
        cart.add_item(GRAPHIC, 1);
        let line = line(&cart, GRAPHIC).unwrap();
        assert_eq!(line.product.name, "Graphic Statement Tee");
        assert_eq!(line.product.price, Price::new(699));
        assert_eq!(line.product.badge.as_deref(), Some("Hot"));
    }

    #[test]
    fn test_update_clamps_to_one_and_keeps_line() {
        let mut cart = store();
        cart.add_item(TEE, 4);

        for requested in [0, -1, -50, i64::MIN] {
            cart.update_quantity(TEE, requested);
            assert_eq!(pairs(&cart), vec![(1, 1)], "requested {requested}");
        }

        cart.update_quantity(TEE, 7);
        assert_eq!(pairs(&cart), vec![(1, 7)]);

        cart.update_quantity(TEE, i64::MAX);
        assert_eq!(line(&cart, TEE).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_update_absent_is_noop() {
        let mut cart = store();
        cart.add_item(TEE, 1);
        cart.update_quantity(BLACK, 5);
        assert_eq!(pairs(&cart), vec![(1, 1)]);
    }

    #[test]
    fn test_remove() {
        let mut cart = store();
        cart.add_item(TEE, 1);
        cart.add_item(BLACK, 1);

        cart.remove_item(TEE);
        assert_eq!(pairs(&cart), vec![(2, 1)]);

        cart.remove_item(GRAPHIC);
        assert_eq!(pairs(&cart), vec![(2, 1)]);
    }

    #[test]
    fn test_total_and_count() {
        let mut cart = store();
        cart.add_item(TEE, 2);
        cart.add_item(GRAPHIC, 1);

        assert_eq!(cart.total(), Price::new(1697));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = store();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_add_add_scenario() {
        let mut cart = store();
        cart.add_item(TEE, 1);
        cart.add_item(BLACK, 1);
        cart.add_item(TEE, 1);

        assert_eq!(pairs(&cart), vec![(1, 2), (2, 1)]);
        assert_eq!(cart.total(), Price::new(499 * 2 + 599));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_state_survives_new_session() {
        let storage = Arc::new(MemoryStorage::new());
        let catalog = Arc::new(ProductCatalog::builtin());

        let mut first = CartStore::open(Arc::clone(&catalog), Arc::clone(&storage));
        first.add_item(GRAPHIC, 2);
        first.add_item(TEE, 1);
        first.update_quantity(GRAPHIC, 5);

        let second = CartStore::open(catalog, storage);
        assert_eq!(pairs(&second), vec![(3, 5), (1, 1)]);
    }

    #[test]
    fn test_clear_persists_empty() {
        let storage = Arc::new(MemoryStorage::new());
        let catalog = Arc::new(ProductCatalog::builtin());

        let mut cart = CartStore::open(Arc::clone(&catalog), Arc::clone(&storage));
        cart.add_item(TEE, 3);
        cart.clear();
        assert!(cart.is_empty());

        let reopened = CartStore::open(catalog, storage);
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_corrupt_storage_opens_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(CART_STORAGE_KEY, "definitely not json").unwrap();

        let mut cart = CartStore::new(Arc::new(ProductCatalog::builtin()), Arc::clone(&storage));
        assert!(matches!(
            cart.load(),
            Err(CartStorageError::CorruptState(_))
        ));
        assert!(cart.is_empty());

        let cart = CartStore::open(Arc::new(ProductCatalog::builtin()), storage);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_failed_save_keeps_cart_usable() {
        let mut cart = CartStore::open(
            Arc::new(ProductCatalog::builtin()),
            MemoryStorage::with_quota(0),
        );

        assert!(cart.add_item(TEE, 2));
        cart.update_quantity(TEE, 3);
        assert_eq!(cart.item_count(), 3);
        assert!(matches!(
            cart.save(),
            Err(CartStorageError::Persistence(StorageError::QuotaExceeded { .. }))
        ));
    }

    #[test]
    fn test_observers_see_changes() {
        let seen: Arc<Mutex<Vec<CartChange>>> = Arc::default();
        let mut cart = store();
        let sink = Arc::clone(&seen);
        cart.subscribe(move |change| sink.lock().unwrap().push(change.clone()));

        cart.add_item(TEE, 2);
        cart.add_item(ProductId::new(77), 1);
        cart.update_quantity(TEE, 1);
        cart.update_quantity(BLACK, 1);
        cart.remove_item(BLACK);
        cart.clear();

        let seen = seen.lock().unwrap();
        let events: Vec<&CartEvent> = seen.iter().map(|c| &c.event).collect();
        assert_eq!(
            events,
            vec![
                &CartEvent::ItemAdded {
                    product_id: TEE,
                    name: "Classic White Tee".to_string(),
                    added: 2,
                    line_quantity: 2,
                },
                &CartEvent::QuantityUpdated {
                    product_id: TEE,
                    quantity: 1,
                },
                &CartEvent::ItemRemoved {
                    product_id: BLACK,
                    was_present: false,
                },
                &CartEvent::Cleared,
            ]
        );
        assert_eq!(seen[0].item_count, 2);
        assert_eq!(seen[0].total, Price::new(998));
        assert_eq!(seen[3].item_count, 0);
    }

    #[test]
    fn test_toast_messages() {
        let added = CartEvent::ItemAdded {
            product_id: TEE,
            name: "Classic White Tee".to_string(),
            added: 1,
            line_quantity: 1,
        };
        assert_eq!(
            added.toast().as_deref(),
            Some("Classic White Tee added to cart!")
        );
        let removed = CartEvent::ItemRemoved {
            product_id: TEE,
            was_present: true,
        };
        assert_eq!(removed.toast().as_deref(), Some("Item removed from cart"));
        assert_eq!(CartEvent::Cleared.toast(), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u32, u32),
        Remove(u32),
        Update(u32, i64),
        Clear,
    }

    // Ids 0, 7 and 8 are not in the catalog.
    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0..=8u32, 0..5u32).prop_map(|(id, qty)| Op::Add(id, qty)),
            2 => (0..=8u32).prop_map(Op::Remove),
            3 => (0..=8u32, -3..10i64).prop_map(|(id, qty)| Op::Update(id, qty)),
            1 => Just(Op::Clear),
        ]
    }

    /// Expected lines as `(id, quantity)` in first-added order.
    fn apply(model: &mut Vec<(u32, u32)>, op: &Op) {
        match *op {
            Op::Add(id, qty) if (1..=6).contains(&id) => {
                let qty = qty.max(1);
                match model.iter_mut().find(|(line_id, _)| *line_id == id) {
                    Some((_, existing)) => *existing += qty,
                    None => model.push((id, qty)),
                }
            }
            Op::Add(..) => {}
            Op::Remove(id) => model.retain(|(line_id, _)| *line_id != id),
            Op::Update(id, qty) => {
                if let Some((_, existing)) = model.iter_mut().find(|(line_id, _)| *line_id == id) {
                    *existing = u32::try_from(qty.max(1)).unwrap();
                }
            }
            Op::Clear => model.clear(),
        }
    }

    proptest! {
        #[test]
        fn prop_random_sequences_keep_cart_invariants(
            ops in proptest::collection::vec(op(), 0..50)
        ) {
            let catalog = Arc::new(ProductCatalog::builtin());
            let storage = Arc::new(MemoryStorage::new());
            let mut cart = CartStore::open(Arc::clone(&catalog), Arc::clone(&storage));
            let mut model = Vec::new();

            for op in &ops {
                match *op {
                    Op::Add(id, qty) => {
                        let known = catalog.get(ProductId::new(id)).is_some();
                        prop_assert_eq!(cart.add_item(ProductId::new(id), qty), known);
                    }
                    Op::Remove(id) => cart.remove_item(ProductId::new(id)),
                    Op::Update(id, qty) => cart.update_quantity(ProductId::new(id), qty),
                    Op::Clear => cart.clear(),
                }
                apply(&mut model, op);

                prop_assert_eq!(pairs(&cart), model.clone());
                prop_assert!(cart.items().iter().all(|line| line.quantity >= 1));

                let mut ids: Vec<u32> = cart.items().iter().map(|line| line.id().as_u32()).collect();
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), cart.items().len());

                let count: u64 = model.iter().map(|(_, qty)| u64::from(*qty)).sum();
                prop_assert_eq!(cart.item_count(), count);

                let total: Price = model
                    .iter()
                    .map(|(id, qty)| catalog.get(ProductId::new(*id)).unwrap().price.times(*qty))
                    .sum();
                prop_assert_eq!(cart.total(), total);
            }

            let reopened = CartStore::open(catalog, storage);
            prop_assert_eq!(reopened.items(), cart.items());
        }
    }
}
