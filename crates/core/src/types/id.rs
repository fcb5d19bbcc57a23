//! Newtype ID for products.
//!
//! Product ids are the cart's identity key: two line items with the same
//! `ProductId` are the same line.

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input is not an integer.
    #[error("product id must be an integer: {0}")]
    NotANumber(String),
    /// Product ids start at 1.
    #[error("product id must be positive")]
    Zero,
}

/// A type-safe product identifier.
///
/// Serializes as a bare integer so persisted carts read `"id": 1`.
///
/// ```rust
/// use fashion_forward_core::ProductId;
///
/// let id: ProductId = "3".parse().unwrap();
/// assert_eq!(id, ProductId::new(3));
/// assert!("0".parse::<ProductId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Create a new ID from a u32 value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the underlying u32 value.
    #[must_use]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl ::core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<ProductId> for u32 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl std::str::FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<u32>()
            .map_err(|_| ProductIdError::NotANumber(s.to_string()))?;
        if id == 0 {
            return Err(ProductIdError::Zero);
        }
        Ok(Self(id))
    }
}
