//! Cart commands over the on-disk cart.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use fashion_forward_core::{ProductCatalog, ProductId};
use fashion_forward_storefront::cart::CartStore;
use fashion_forward_storefront::notifications::Notifier;
use fashion_forward_storefront::storage::{FileStorage, KeyValueStorage};

/// A cart loaded for one command, with the toast it raised.
pub struct CartSession<S> {
    cart: CartStore<S>,
    notifier: Arc<Notifier>,
}

impl CartSession<FileStorage> {
    /// Load the cart stored under `dir`. An unreadable cart starts empty.
    pub fn open(dir: &Path) -> Self {
        Self::with_storage(FileStorage::new(dir))
    }
}

impl<S: KeyValueStorage> CartSession<S> {
    pub fn with_storage(storage: S) -> Self {
        let notifier = Arc::new(Notifier::default());
        let mut cart = CartStore::open(Arc::new(ProductCatalog::builtin()), storage);
        cart.subscribe(notifier.cart_observer());
        Self { cart, notifier }
    }

    /// Cart contents and total.
    pub fn show(&self) -> String {
        if self.cart.is_empty() {
            return "Your cart is empty".to_string();
        }

        let mut out = String::new();
        for line in self.cart.items() {
            let _ = writeln!(
                out,
                "{:>3}  {:<24} {} × {} = {}",
                line.id(),
                line.product.name,
                line.product.price.display(),
                line.quantity,
                line.line_total().display()
            );
        }
        let _ = write!(
            out,
            "Items: {}\nTotal: {}",
            self.cart.item_count(),
            self.cart.total().display()
        );
        out
    }

    /// Add `quantity` of a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog has no product with this id.
    pub fn add(&mut self, id: ProductId, quantity: u32) -> Result<String, String> {
        if !self.cart.add_item(id, quantity) {
            return Err(format!("Unknown product: {id}"));
        }
        Ok(self.with_toast())
    }

    /// Remove a product's line.
    pub fn remove(&mut self, id: ProductId) -> String {
        self.cart.remove_item(id);
        self.with_toast()
    }

    /// Set a line's quantity. Lines not in the cart are left alone.
    pub fn set(&mut self, id: ProductId, quantity: i64) -> String {
        self.cart.update_quantity(id, quantity);
        self.show()
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> String {
        self.cart.clear();
        "Cart cleared".to_string()
    }

    /// Print the total and empty the cart.
    pub fn checkout(&mut self) -> String {
        if self.cart.is_empty() {
            return "Your cart is empty!".to_string();
        }

        let total = self.cart.total();
        self.cart.clear();
        format!(
            "Checkout initiated!\nTotal: {}\nThank you for shopping with Fashion Forward!",
            total.display()
        )
    }

    fn with_toast(&self) -> String {
        let summary = format!(
            "Cart: {} item(s), {}",
            self.cart.item_count(),
            self.cart.total().display()
        );
        match self.notifier.current() {
            Some(toast) => format!("{}\n{summary}", toast.message),
            None => summary,
        }
    }
}
