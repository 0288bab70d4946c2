//! qrshop CLI - a storefront at the command line.
//!
//! Commands:
//! - `qrshop catalog` - Browse products
//! - `qrshop scan` - Look up a decoded QR code, optionally adding it to the cart
//! - `qrshop cart` - Show and change the cart
//! - `qrshop config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CartArgs, CatalogArgs, ConfigArgs, ScanArgs};

/// qrshop - Browse the catalog, scan product labels and manage your cart
#[derive(Parser)]
#[command(name = "qrshop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log filter (overrides the config file; RUST_LOG overrides both)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog(CatalogArgs),

    /// Look up a scanned product code
    Scan(ScanArgs),

    /// Show and change the cart
    Cart(CartArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let loaded = match &cli.command {
        Commands::Config(args) if args.tolerates_broken_config() => {
            context::Context::load_or_default(cli.config.as_deref(), output.clone())
        }
        _ => context::Context::load(cli.config.as_deref(), output.clone()),
    };
    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&ctx.config.log.level)
        .to_string();
    logging::init_tracing(&level, cli.json)?;
    tracing::debug!(cwd = %ctx.cwd.display(), "qrshop starting");

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Scan(args) => commands::scan::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CartCommand, ConfigCommand};

    #[test]
    fn test_negative_quantities_reach_the_domain() {
        let cli = Cli::try_parse_from(["qrshop", "scan", "SKU-1", "--add", "--qty", "-1"]).unwrap();
        match cli.command {
            Commands::Scan(args) => assert_eq!(args.qty, -1),
            _ => panic!("expected scan"),
        }

        let cli =
            Cli::try_parse_from(["qrshop", "cart", "add", "--product", "SKU-1", "--qty", "-1"])
                .unwrap();
        match cli.command {
            Commands::Cart(CartArgs {
                command: Some(CartCommand::Add { qty, .. }),
            }) => assert_eq!(qty, -1),
            _ => panic!("expected cart add"),
        }
    }

    #[test]
    fn test_only_config_init_tolerates_broken_config() {
        let cli = Cli::try_parse_from(["qrshop", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config(args) => {
                assert!(matches!(args.command, ConfigCommand::Init { force: true }));
                assert!(args.tolerates_broken_config());
            }
            _ => panic!("expected config init"),
        }

        let cli = Cli::try_parse_from(["qrshop", "config", "show"]).unwrap();
        match cli.command {
            Commands::Config(args) => assert!(!args.tolerates_broken_config()),
            _ => panic!("expected config show"),
        }
    }
}
