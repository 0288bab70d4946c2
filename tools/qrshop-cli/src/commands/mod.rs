//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod scan;

use clap::{Args, Subcommand};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// List the lines in the cart.
    Show,
    /// Print the cart total.
    Total,
    /// Add a product from the catalog.
    Add {
        /// Product SKU.
        #[arg(short, long)]
        product: String,
        /// Size code.
        #[arg(short, long)]
        size: Option<String>,
        /// Units to add.
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        qty: i64,
    },
    /// Change the quantity of a line (clamped to available stock).
    Update {
        /// Product id.
        product_id: i64,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        qty: i64,
        /// Size code of the line.
        #[arg(short, long)]
        size: Option<String>,
    },
    /// Remove a line.
    Remove {
        /// Product id.
        product_id: i64,
        /// Size code of the line.
        #[arg(short, long)]
        size: Option<String>,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Text decoded from the product's QR label.
    pub code: String,

    /// Add the scanned product to the cart.
    #[arg(long)]
    pub add: bool,

    /// Size to add (prompted for when omitted).
    #[arg(short, long)]
    pub size: Option<String>,

    /// Units to add.
    #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
    pub qty: i64,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: Option<CatalogCommand>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products, newest first.
    List,
    /// Show a product with its sizes.
    Show {
        /// Product SKU.
        sku: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

impl ConfigArgs {
    /// `config init` must work even when the current config is broken.
    pub fn tolerates_broken_config(&self) -> bool {
        matches!(self.command, ConfigCommand::Init { .. })
    }
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
