//! Cart line items.

use serde::{Deserialize, Serialize};

use super::{Price, Product, ProductId};

/// One product-plus-quantity entry in the cart.
///
/// Holds a snapshot of the product taken when it was first added, so later
/// catalog changes do not rewrite an existing cart. Persisted as a flat object:
///
/// ```json
/// {"id":1,"name":"Classic White Tee","price":499,"originalPrice":699,
///  "img":"...","badge":"Bestseller","description":"...","quantity":2}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product fields as they were at add time.
    #[serde(flatten)]
    pub product: Product,
    /// Units in the cart. Never below 1.
    pub quantity: u32,
}

impl CartLineItem {
    /// Snapshot `product` with the given quantity (clamped to at least 1).
    #[must_use]
    pub fn new(product: &Product, quantity: u32) -> Self {
        Self {
            product: product.clone(),
            quantity: quantity.max(1),
        }
    }

    /// The line's product id.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}
