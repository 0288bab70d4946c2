//! The cart aggregate: line items merged by identity and bounded by stock.

use crate::cart::{CartLineItem, LineKey};
use crate::ids::{ProductId, VariantKey};
use crate::money::{Currency, Money};
use serde::Serialize;

/// Why an add was refused. The cart is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Quantity was zero or negative.
    InvalidQuantity { requested: i64 },
    /// The resulting line would exceed its stock ceiling.
    InsufficientStock { requested: i64, available: i64 },
    /// Unit price is in a different currency than the cart.
    CurrencyMismatch { expected: Currency, got: Currency },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::InvalidQuantity { requested } => {
                write!(f, "Quantity must be at least 1, got {}", requested)
            }
            Rejection::InsufficientStock { available, .. } => {
                write!(f, "Insufficient stock. Only {} units available.", available)
            }
            Rejection::CurrencyMismatch { expected, got } => {
                write!(f, "Price in {} cannot be added to a {} cart", got, expected)
            }
        }
    }
}

/// Result of [`Cart::add_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was created.
    Inserted { quantity: i64 },
    /// An existing line absorbed the quantity.
    Merged { quantity: i64 },
    Rejected(Rejection),
}

impl AddOutcome {
    /// Whether the cart changed.
    pub fn is_applied(&self) -> bool {
        !matches!(self, AddOutcome::Rejected(_))
    }
}

/// Result of [`Cart::update_qty`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Quantity changed. `clamped` is set when the request was pulled into
    /// `1..=stock_ceiling`.
    Updated { quantity: i64, clamped: bool },
    /// The line already had the resulting quantity.
    Unchanged { quantity: i64 },
    /// No line matched.
    NotFound,
}

impl UpdateOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, UpdateOutcome::Updated { .. })
    }
}

/// A shopper's cart.
///
/// At most one line exists per (product, size) and every line satisfies
/// `0 < quantity <= stock_ceiling`.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct Cart {
    items: Vec<CartLineItem>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Rebuild a cart from stored lines.
    ///
    /// Stored data is not trusted: lines that break the stock invariant are
    /// clamped or dropped, lines priced in another currency are dropped, and
    /// duplicate keys are merged into the first occurrence.
    pub fn from_items(items: Vec<CartLineItem>, currency: Currency) -> Self {
        let mut cart = Self::new(currency);
        for mut item in items {
            if item.stock_ceiling <= 0 || item.quantity <= 0 {
                tracing::warn!(key = %item.key(), "dropping stored line without stock");
                continue;
            }
            if let Some(price) = item.unit_price {
                if price.currency != currency {
                    tracing::warn!(key = %item.key(), currency = %price.currency, "dropping stored line in foreign currency");
                    continue;
                }
            }
            match cart.position(item.product_id, item.variant_key.as_ref()) {
                Some(idx) => {
                    let existing = &mut cart.items[idx];
                    existing.quantity = existing
                        .quantity
                        .saturating_add(item.quantity)
                        .min(existing.stock_ceiling);
                }
                None => {
                    item.quantity = item.quantity.min(item.stock_ceiling);
                    cart.items.push(item);
                }
            }
        }
        cart
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Lines in the order they were first added.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }

    /// Add a line, merging with an existing line of the same product/size.
    ///
    /// Adds that would push a line past its stock ceiling are rejected
    /// rather than clamped.
    pub fn add_item(&mut self, item: CartLineItem) -> AddOutcome {
        if item.quantity <= 0 {
            return self.reject(&item, Rejection::InvalidQuantity {
                requested: item.quantity,
            });
        }

        if let Some(idx) = self.position(item.product_id, item.variant_key.as_ref()) {
            let existing = &mut self.items[idx];
            let new_quantity = existing.quantity.saturating_add(item.quantity);
            if new_quantity > existing.stock_ceiling {
                let available = existing.stock_ceiling;
                return self.reject(&item, Rejection::InsufficientStock {
                    requested: new_quantity,
                    available,
                });
            }
            existing.quantity = new_quantity;
            return AddOutcome::Merged {
                quantity: new_quantity,
            };
        }

        if item.quantity > item.stock_ceiling {
            return self.reject(&item, Rejection::InsufficientStock {
                requested: item.quantity,
                available: item.stock_ceiling,
            });
        }
        if let Some(price) = item.unit_price {
            if price.currency != self.currency {
                return self.reject(&item, Rejection::CurrencyMismatch {
                    expected: self.currency,
                    got: price.currency,
                });
            }
        }

        let quantity = item.quantity;
        self.items.push(item);
        AddOutcome::Inserted { quantity }
    }

    /// Set a line's quantity to `min(quantity, stock_ceiling)`.
    ///
    /// Unlike [`add_item`](Self::add_item) this clamps instead of rejecting.
    /// Requests below 1 clamp to 1; removing a line is
    /// [`remove_item`](Self::remove_item)'s job.
    pub fn update_qty(
        &mut self,
        product_id: ProductId,
        variant_key: Option<&VariantKey>,
        quantity: i64,
    ) -> UpdateOutcome {
        let Some(idx) = self.position(product_id, variant_key) else {
            return UpdateOutcome::NotFound;
        };
        let line = &mut self.items[idx];

        let target = quantity.clamp(1, line.stock_ceiling.max(1));
        let clamped = target != quantity;
        if clamped {
            tracing::warn!(
                key = %line.key(),
                requested = quantity,
                applied = target,
                stock = line.stock_ceiling,
                "quantity clamped to stock"
            );
        }

        if line.quantity == target {
            return UpdateOutcome::Unchanged { quantity: target };
        }
        line.quantity = target;
        UpdateOutcome::Updated {
            quantity: target,
            clamped,
        }
    }

    /// Remove the matching line. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId, variant_key: Option<&VariantKey>) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| !i.matches(product_id, variant_key));
        self.items.len() < len_before
    }

    /// Remove every line. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        self.items.clear();
        had_items
    }

    /// Sum of `unit_price * quantity`; unpriced lines count as zero.
    pub fn total(&self) -> Money {
        let amount = self
            .items
            .iter()
            .filter_map(CartLineItem::line_total)
            .filter(|m| m.currency == self.currency)
            .fold(0_i64, |acc, m| acc.saturating_add(m.amount_cents));
        Money::new(amount, self.currency)
    }

    pub fn get_item(&self, key: &LineKey) -> Option<&CartLineItem> {
        self.position(key.product_id, key.variant_key.as_ref())
            .map(|idx| &self.items[idx])
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, product_id: ProductId, variant_key: Option<&VariantKey>) -> Option<usize> {
        self.items
            .iter()
            .position(|i| i.matches(product_id, variant_key))
    }

    fn reject(&self, item: &CartLineItem, rejection: Rejection) -> AddOutcome {
        tracing::warn!(key = %item.key(), "{}", rejection);
        AddOutcome::Rejected(rejection)
    }
}
