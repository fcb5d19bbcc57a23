//! Fashion Forward Core - Shared types library.
//!
//! This crate provides the types used across all Fashion Forward components:
//! - `storefront` - Cart store, storage backends and the HTTP storefront
//! - `cli` - Command-line access to the same cart
//!
//! # Architecture
//!
//! The core crate contains only types and the compiled-in catalog - no I/O,
//! no storage, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, products and cart line items
//! - [`catalog`] - The immutable product catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use catalog::ProductCatalog;
pub use types::*;
