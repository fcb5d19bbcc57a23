//! Fashion Forward CLI - browse the catalog and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! ff-cli catalog
//!
//! # Add two of product 3 to the cart, then look at it
//! ff-cli cart add 3 -q 2
//! ff-cli cart show
//!
//! # Set a quantity directly (values below 1 become 1)
//! ff-cli cart set 3 5
//!
//! # Check out (prints the total and empties the cart)
//! ff-cli checkout
//! ```
//!
//! The cart lives in the same storage directory the storefront server uses,
//! so both see the same cart.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fashion_forward_core::ProductId;
use fashion_forward_storefront::config::DEFAULT_STORAGE_DIR;

mod commands;

#[derive(Parser)]
#[command(name = "ff-cli")]
#[command(author, version, about = "Fashion Forward CLI tools")]
struct Cli {
    /// Directory holding the persisted cart
    #[arg(long, global = true, env = "STOREFRONT_STORAGE_DIR", default_value = DEFAULT_STORAGE_DIR)]
    storage_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every product in the catalog
    Catalog,
    /// Show details for one product
    QuickView {
        /// Product ID
        id: ProductId,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show the total and empty the cart
    Checkout,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and total
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        id: ProductId,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Set the quantity of a product already in the cart
    Set {
        /// Product ID
        id: ProductId,

        /// New quantity (values below 1 become 1)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove everything from the cart
    Clear,
}

fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let output = match cli.command {
        Commands::Catalog => commands::catalog::list(),
        Commands::QuickView { id } => commands::catalog::quick_view(id)?,
        Commands::Cart { action } => {
            let mut session = commands::cart::CartSession::open(&cli.storage_dir);
            match action {
                CartAction::Show => session.show(),
                CartAction::Add { id, quantity } => session.add(id, quantity)?,
                CartAction::Remove { id } => session.remove(id),
                CartAction::Set { id, quantity } => session.set(id, quantity),
                CartAction::Clear => session.clear(),
            }
        }
        Commands::Checkout => commands::cart::CartSession::open(&cli.storage_dir).checkout(),
    };

    println!("{output}");
    Ok(())
}
