//! Cart persistence.
//!
//! The cart is stored as a JSON array of line items under a single fixed key.
//! This module owns the key and the encoding; backends only move strings.

use std::collections::HashMap;

use fashion_forward_core::{CartLineItem, ProductId};
use thiserror::Error;

use crate::storage::{KeyValueStorage, StorageError};

/// Storage key for the serialized cart.
pub const CART_STORAGE_KEY: &str = "fashionForwardCart";

/// Errors loading or saving the cart.
#[derive(Debug, Error)]
pub enum CartStorageError {
    /// Persisted data is present but cannot be parsed.
    #[error("corrupt cart state: {0}")]
    CorruptState(#[source] serde_json::Error),

    /// The storage backend failed.
    #[error("cart persistence failed: {0}")]
    Persistence(#[from] StorageError),

    /// The cart could not be serialized.
    #[error("cart encoding failed: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Loads and saves the cart through a storage backend.
#[derive(Debug)]
pub struct CartRepository<S> {
    storage: S,
}

impl<S: KeyValueStorage> CartRepository<S> {
    /// Create a repository over `storage`.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load the persisted cart.
    ///
    /// An absent key is an empty cart. Duplicate ids in the stored array are
    /// merged into the first occurrence and quantities below 1 are raised to 1,
    /// so the returned lines always satisfy the cart invariants.
    ///
    /// # Errors
    ///
    /// Returns `CartStorageError::Persistence` if the backend cannot be read.
    /// Returns `CartStorageError::CorruptState` if the stored value is not a
    /// valid cart.
    pub fn load(&self) -> Result<Vec<CartLineItem>, CartStorageError> {
        let Some(raw) = self.storage.read(CART_STORAGE_KEY)? else {
            return Ok(Vec::new());
        };

        let items: Vec<CartLineItem> =
            serde_json::from_str(&raw).map_err(CartStorageError::CorruptState)?;

        Ok(normalize(items))
    }

    /// Persist `items`, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns `CartStorageError::Persistence` if the backend rejects the write.
    pub fn save(&self, items: &[CartLineItem]) -> Result<(), CartStorageError> {
        let raw = serde_json::to_string(items).map_err(CartStorageError::Encode)?;
        self.storage.write(CART_STORAGE_KEY, &raw)?;
        Ok(())
    }
}

fn normalize(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut positions: HashMap<ProductId, usize> = HashMap::with_capacity(items.len());
    let mut merged: Vec<CartLineItem> = Vec::with_capacity(items.len());

    for mut item in items {
        item.quantity = item.quantity.max(1);
        match positions.get(&item.id()).and_then(|&i| merged.get_mut(i)) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => {
                positions.insert(item.id(), merged.len());
                merged.push(item);
            }
        }
    }

    merged
}
