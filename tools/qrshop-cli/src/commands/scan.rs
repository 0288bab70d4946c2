//! Scan command: resolve decoded QR text and optionally add it to the cart.

use anyhow::{anyhow, bail, Result};
use dialoguer::Select;
use qrshop_commerce::catalog::Product;
use qrshop_commerce::scan::ScanHandler;

use super::cart::add_line;
use super::catalog::print_product;
use super::ScanArgs;
use crate::context::Context;

/// Run the scan command.
pub fn run(args: ScanArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let mut scanner = ScanHandler::new(&catalog);

    let product = match scanner.on_decoded(&args.code) {
        Ok(product) => product,
        Err(e) => {
            ctx.output.debug(&e.to_string());
            if e.is_retryable() {
                ctx.output.info("Scan the code again to retry.");
            }
            return Err(anyhow!(e.user_message()));
        }
    };

    if ctx.output.is_json() && !args.add {
        ctx.output.json(&product);
        return Ok(());
    }
    print_product(&product, ctx);

    if !args.add {
        return Ok(());
    }

    let size = match args.size {
        Some(size) => Some(size),
        None => choose_size(&product, ctx)?,
    };
    let item = product.line_item(size.as_deref(), args.qty)?;

    let mut store = ctx.open_cart()?;
    add_line(&mut store, item, ctx)
}

/// Ask for a size when the product is sold by size.
fn choose_size(product: &Product, ctx: &Context) -> Result<Option<String>> {
    if !product.has_variants() {
        return Ok(None);
    }

    let sizes: Vec<&str> = product
        .available_variants()
        .map(|v| v.size.as_str())
        .collect();
    if sizes.is_empty() {
        bail!("{} is sold out in every size", product.name);
    }
    if ctx.output.is_json() {
        bail!("Please select a size with --size ({})", sizes.join(", "));
    }

    let selection = Select::new()
        .with_prompt("Select a size")
        .items(&sizes)
        .default(0)
        .interact()?;
    Ok(Some(sizes[selection].to_string()))
}
