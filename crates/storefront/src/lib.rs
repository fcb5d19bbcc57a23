//! Fashion Forward Storefront library.
//!
//! This crate provides the cart store and the storefront's HTTP layer as a
//! library, allowing both to be tested and reused (the CLI drives the same
//! [`cart::CartStore`] over [`storage::FileStorage`]).
//!
//! # Modules
//!
//! - [`cart`] - Cart state, persistence and change events
//! - [`storage`] - Key-value storage backends
//! - [`notifications`] - Transient toast messages
//! - [`routes`] / [`middleware`] / [`state`] - The HTMX storefront

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod middleware;
pub mod notifications;
pub mod routes;
pub mod state;
pub mod storage;
