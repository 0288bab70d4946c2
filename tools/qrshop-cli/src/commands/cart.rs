//! Cart commands.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use qrshop_commerce::cart::{AddOutcome, CartLineItem, CartStore, UpdateOutcome};
use qrshop_commerce::catalog::CatalogSource;
use qrshop_commerce::{CommerceError, Money, ProductId, VariantKey};
use qrshop_storage::KeyValueStore;
use serde::Serialize;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CartCommand::Show) | None => show_cart(ctx),
        Some(CartCommand::Total) => show_total(ctx),
        Some(CartCommand::Add { product, size, qty }) => add(&product, size.as_deref(), qty, ctx),
        Some(CartCommand::Update {
            product_id,
            qty,
            size,
        }) => update(product_id, size, qty, ctx),
        Some(CartCommand::Remove { product_id, size }) => remove(product_id, size, ctx),
        Some(CartCommand::Clear { yes }) => clear(yes, ctx),
    }
}

/// JSON view of the cart.
#[derive(Serialize)]
struct CartView<'a> {
    items: &'a [CartLineItem],
    item_count: i64,
    total: Money,
}

fn show_cart(ctx: &Context) -> Result<()> {
    let store = ctx.open_cart()?;

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            items: store.items(),
            item_count: store.item_count(),
            total: store.get_total(),
        });
        return Ok(());
    }

    ctx.output.header("Cart");
    if store.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    ctx.output.cart_table(store.items());

    ctx.output.info("");
    ctx.output.kv("Items", &store.item_count().to_string());
    ctx.output.kv("Total", &store.get_total().display());
    Ok(())
}

fn show_total(ctx: &Context) -> Result<()> {
    let store = ctx.open_cart()?;
    let total = store.get_total();

    if ctx.output.is_json() {
        ctx.output.json(&total);
    } else {
        println!("{}", total.display());
    }
    Ok(())
}

fn add(sku: &str, size: Option<&str>, qty: i64, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let product = catalog
        .find_by_sku(sku)?
        .ok_or_else(|| CommerceError::ProductNotFound(sku.to_string()))?;

    let item = product.line_item(size, qty)?;
    let mut store = ctx.open_cart()?;
    add_line(&mut store, item, ctx)
}

/// Add a prepared line and report the outcome. Stock rejections are
/// warnings, not failures.
pub(crate) fn add_line<S: KeyValueStore>(
    store: &mut CartStore<S>,
    item: CartLineItem,
    ctx: &Context,
) -> Result<()> {
    let name = item.product_name.clone();
    let outcome = store.add_item(item).context("Failed to save cart")?;

    match &outcome {
        AddOutcome::Inserted { quantity } => {
            ctx.output.success(&format!("Added {} x {}", quantity, name));
        }
        AddOutcome::Merged { quantity } => {
            ctx.output
                .success(&format!("{} now has {} units in the cart", name, quantity));
        }
        AddOutcome::Rejected(reason) => ctx.output.warn(&reason.to_string()),
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "applied": outcome.is_applied(),
            "item_count": store.item_count(),
            "total": store.get_total(),
        }));
    } else {
        ctx.output.kv("Total", &store.get_total().display());
    }
    Ok(())
}

fn update(product_id: i64, size: Option<String>, qty: i64, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;
    let key = size.map(VariantKey::from);
    let outcome = store
        .update_qty(ProductId::new(product_id), key.as_ref(), qty)
        .context("Failed to save cart")?;

    match outcome {
        UpdateOutcome::Updated { quantity, clamped } => {
            if clamped {
                ctx.output.warn(&format!(
                    "Requested {} units; quantity set to {}",
                    qty, quantity
                ));
            }
            ctx.output.success("Quantity updated.");
        }
        UpdateOutcome::Unchanged { quantity } => {
            ctx.output
                .info(&format!("Quantity already {}; nothing to do.", quantity));
        }
        UpdateOutcome::NotFound => {
            ctx.output.warn(&format!(
                "No cart line for product {}{}",
                product_id,
                key.map(|k| format!(" size {}", k)).unwrap_or_default()
            ));
        }
    }
    Ok(())
}

fn remove(product_id: i64, size: Option<String>, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;
    let key = size.map(VariantKey::from);

    if store
        .remove_item(ProductId::new(product_id), key.as_ref())
        .context("Failed to save cart")?
    {
        ctx.output.success("Item removed.");
    } else {
        ctx.output.info("Item was not in the cart.");
    }
    Ok(())
}

fn clear(yes: bool, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;
    if store.is_empty() {
        ctx.output.info("Your cart is already empty.");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} items from the cart?", store.item_count()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Cart left unchanged.");
            return Ok(());
        }
    }

    store.clear().context("Failed to save cart")?;
    ctx.output.success("Cart cleared.");
    Ok(())
}
