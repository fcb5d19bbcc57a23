//! Core types for Fashion Forward.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::CartLineItem;
pub use id::{ProductId, ProductIdError};
pub use price::{CURRENCY_SYMBOL, Price};
pub use product::Product;
