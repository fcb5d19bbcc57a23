//! Cart persistence across store instances.
//!
//! Each test opens a store, mutates it, drops it, and opens a fresh store over
//! the same backend, the way a page reload or a second CLI invocation would.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use fashion_forward_core::{ProductCatalog, ProductId};
use fashion_forward_storefront::cart::{CART_STORAGE_KEY, CartStore};
use fashion_forward_storefront::storage::{FileStorage, KeyValueStorage, MemoryStorage};

fn catalog() -> Arc<ProductCatalog> {
    Arc::new(ProductCatalog::builtin())
}

#[test]
fn cart_round_trips_through_file_storage() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut cart = CartStore::open(catalog(), FileStorage::new(dir.path()));
        cart.add_item(ProductId::new(1), 2);
        cart.add_item(ProductId::new(4), 1);
        cart.update_quantity(ProductId::new(4), 3);
    }

    let cart = CartStore::open(catalog(), FileStorage::new(dir.path()));
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.item_count(), 5);
    assert_eq!(cart.total().amount(), 2 * 499 + 3 * 549);
    assert_eq!(cart.items().first().unwrap().id(), ProductId::new(1));
}

#[test]
fn persisted_format_is_a_camel_case_array() {
    let storage = Arc::new(MemoryStorage::new());
    let mut cart = CartStore::open(catalog(), Arc::clone(&storage));
    cart.add_item(ProductId::new(1), 2);

    let raw = storage.read(CART_STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let line = &json[0];

    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(line["id"], 1);
    assert_eq!(line["quantity"], 2);
    assert_eq!(line["price"], 499);
    assert_eq!(line["originalPrice"], 699);
    assert_eq!(line["name"], "Classic White Tee");
}

#[test]
fn corrupt_file_opens_empty_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    storage.write(CART_STORAGE_KEY, "{not json").unwrap();

    let mut cart = CartStore::open(catalog(), FileStorage::new(dir.path()));
    assert!(cart.is_empty());

    cart.add_item(ProductId::new(2), 1);

    let reopened = CartStore::open(catalog(), FileStorage::new(dir.path()));
    assert_eq!(reopened.item_count(), 1);
}

#[test]
fn duplicate_lines_are_merged_on_load() {
    let storage = Arc::new(MemoryStorage::new());
    let product = serde_json::to_value(ProductCatalog::builtin().get(ProductId::new(3)).unwrap())
        .unwrap();
    let mut first = product.clone();
    first["quantity"] = 2.into();
    let mut second = product;
    second["quantity"] = 0.into();
    storage
        .write(
            CART_STORAGE_KEY,
            &serde_json::Value::Array(vec![first, second]).to_string(),
        )
        .unwrap();

    let cart = CartStore::open(catalog(), Arc::clone(&storage));
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.item_count(), 3);
}

#[test]
fn full_quota_keeps_cart_in_memory() {
    let storage = Arc::new(MemoryStorage::with_quota(16));
    let mut cart = CartStore::open(catalog(), Arc::clone(&storage));

    assert!(cart.add_item(ProductId::new(5), 2));
    assert_eq!(cart.item_count(), 2);
    assert_eq!(storage.read(CART_STORAGE_KEY).unwrap(), None);

    let reopened = CartStore::open(catalog(), Arc::clone(&storage));
    assert!(reopened.is_empty());
}

#[test]
fn clear_persists_an_empty_cart() {
    let dir = tempfile::tempdir().unwrap();

    let mut cart = CartStore::open(catalog(), FileStorage::new(dir.path()));
    cart.add_item(ProductId::new(6), 4);
    cart.clear();

    let raw = FileStorage::new(dir.path())
        .read(CART_STORAGE_KEY)
        .unwrap()
        .unwrap();
    assert_eq!(raw, "[]");
    assert!(CartStore::open(catalog(), FileStorage::new(dir.path())).is_empty());
}
