//! Subcommand implementations.
//!
//! Each command returns the text to print; `main` does the printing.

pub mod cart;
pub mod catalog;
