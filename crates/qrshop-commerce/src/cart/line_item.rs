//! Cart line items.

use crate::ids::{ProductId, VariantKey};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a cart line: one product in one size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub variant_key: Option<VariantKey>,
}

impl LineKey {
    pub fn new(product_id: ProductId, variant_key: Option<VariantKey>) -> Self {
        Self {
            product_id,
            variant_key,
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant_key {
            Some(key) => write!(f, "{}-{}", self.product_id, key),
            None => write!(f, "{}-", self.product_id),
        }
    }
}

/// One entry per distinct (product, size) the shopper has selected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    pub product_id: ProductId,
    /// Display name snapshotted when the line was added.
    pub product_name: String,
    /// SKU snapshotted when the line was added.
    #[serde(default)]
    pub sku: String,
    /// Size code; absent for products sold without sizes.
    #[serde(default)]
    pub variant_key: Option<VariantKey>,
    pub quantity: i64,
    /// Price snapshotted when the line was added, never re-fetched.
    #[serde(default)]
    pub unit_price: Option<Money>,
    /// Units known to be available for this size when the line was added.
    pub stock_ceiling: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
}

impl CartLineItem {
    /// Create a line without size, price or SKU.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: i64,
        stock_ceiling: i64,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            sku: String::new(),
            variant_key: None,
            quantity,
            unit_price: None,
            stock_ceiling,
            image_src: None,
        }
    }

    pub fn with_variant(mut self, variant_key: impl Into<VariantKey>) -> Self {
        self.variant_key = Some(variant_key.into());
        self
    }

    pub fn with_unit_price(mut self, unit_price: Money) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    pub fn with_image(mut self, image_src: impl Into<String>) -> Self {
        self.image_src = Some(image_src.into());
        self
    }

    /// Identity used for merging.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id, self.variant_key.clone())
    }

    pub fn matches(&self, product_id: ProductId, variant_key: Option<&VariantKey>) -> bool {
        self.product_id == product_id && self.variant_key.as_ref() == variant_key
    }

    /// `unit_price * quantity`, or `None` when the line has no price.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.map(|p| p.saturating_multiply(self.quantity))
    }

    /// Whether `0 < quantity <= stock_ceiling` holds.
    pub fn is_within_stock(&self) -> bool {
        self.quantity > 0 && self.quantity <= self.stock_ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_key_display() {
        let sized = CartLineItem::new(ProductId::new(1), "Shirt", 1, 5).with_variant("M");
        assert_eq!(sized.key().to_string(), "1-M");

        let plain = CartLineItem::new(ProductId::new(2), "Mug", 1, 5);
        assert_eq!(plain.key().to_string(), "2-");
    }

    #[test]
    fn test_matches_distinguishes_missing_size() {
        let plain = CartLineItem::new(ProductId::new(1), "Mug", 1, 5);
        assert!(plain.matches(ProductId::new(1), None));
        assert!(!plain.matches(ProductId::new(1), Some(&VariantKey::new("M"))));
    }

    #[test]
    fn test_line_total() {
        let item = CartLineItem::new(ProductId::new(1), "Shirt", 3, 5)
            .with_unit_price(Money::from_decimal(10.0, Currency::PEN));
        assert_eq!(item.line_total(), Some(Money::new(3000, Currency::PEN)));

        let unpriced = CartLineItem::new(ProductId::new(1), "Shirt", 3, 5);
        assert_eq!(unpriced.line_total(), None);
    }

    #[test]
    fn test_is_within_stock() {
        assert!(CartLineItem::new(ProductId::new(1), "A", 5, 5).is_within_stock());
        assert!(!CartLineItem::new(ProductId::new(1), "A", 6, 5).is_within_stock());
        assert!(!CartLineItem::new(ProductId::new(1), "A", 0, 5).is_within_stock());
    }
}
