//! Catalog browsing commands.

use anyhow::{bail, Result};
use qrshop_commerce::catalog::{CatalogSource, Product};

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::{price_or_na, stock_badge};

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CatalogCommand::List) | None => list_products(ctx),
        Some(CatalogCommand::Show { sku }) => show_product(&sku, ctx),
    }
}

fn list_products(ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let products = catalog.list_products()?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Products");
    if products.is_empty() {
        ctx.output.info("The catalog is empty.");
        return Ok(());
    }

    let widths = [14, 28, 12, 6];
    ctx.output.table_row(&["SKU", "NAME", "PRICE", "STOCK"], &widths);
    for product in &products {
        let price = price_label(product);
        let stock = product.stock_on_hand().to_string();
        ctx.output.table_row(
            &[
                product.sku.as_str(),
                product.name.as_str(),
                price.as_str(),
                stock.as_str(),
            ],
            &widths,
        );
    }
    Ok(())
}

fn show_product(sku: &str, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let Some(product) = catalog.find_by_sku(sku)? else {
        bail!("Product not found: {}", sku);
    };

    if ctx.output.is_json() {
        ctx.output.json(&product);
    } else {
        print_product(&product, ctx);
    }
    Ok(())
}

/// Human-readable product card with its sizes.
pub(crate) fn print_product(product: &Product, ctx: &Context) {
    ctx.output.header(&product.name);
    if let Some(ref brand) = product.brand {
        ctx.output.kv("Brand", brand);
    }
    ctx.output.kv("SKU", &product.sku);
    ctx.output.kv("Price", &price_label(product));
    if let Some(ref description) = product.description {
        ctx.output.kv("Description", description);
    }
    ctx.output
        .kv("Total stock", &format!("{} units", product.stock_on_hand()));

    if product.has_variants() {
        ctx.output.info("Sizes:");
        for variant in &product.variants {
            ctx.output
                .list_item(&format!("{:<6} {}", variant.size, stock_badge(variant.stock)));
        }
    }
}

fn price_label(product: &Product) -> String {
    price_or_na(product.price)
}
