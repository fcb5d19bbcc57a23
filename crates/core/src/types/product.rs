//! Catalog product records.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as listed in the catalog.
///
/// Field names serialize in camelCase (`originalPrice`) to match the persisted
/// cart format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identity key.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current selling price.
    pub price: Price,
    /// Price before discount. Expected to be `>= price` but not enforced.
    pub original_price: Price,
    /// Image URI. Not validated; rendering falls back to a placeholder.
    pub img: String,
    /// Optional short label such as "New".
    #[serde(default)]
    pub badge: Option<String>,
    /// Display description.
    pub description: String,
}

impl Product {
    /// Whether the product is sold below its original price.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.original_price > self.price
    }

    /// Discount as a whole percentage of the original price, rounded half up.
    ///
    /// Returns 0 when there is no discount.
    #[must_use]
    pub fn discount_percent(&self) -> u64 {
        if !self.has_discount() {
            return 0;
        }
        let original = self.original_price.amount();
        let saved = original - self.price.amount();
        // round(saved / original * 100) in integer arithmetic
        saved.saturating_mul(200).saturating_add(original) / original.saturating_mul(2)
    }
}
