//! Product and variant types.

use crate::cart::CartLineItem;
use crate::catalog::calc_total_stock;
use crate::error::CommerceError;
use crate::ids::{ProductId, VariantId, VariantKey};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog, together with its per-size stock rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Primary key.
    pub id: ProductId,
    /// Stock keeping unit, printed on the product's QR label.
    pub sku: String,
    /// Product name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Unit price. Products may be listed before they are priced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Stock recorded on the product row itself. Only authoritative when
    /// the product has no variants.
    #[serde(default)]
    pub total_stock: i64,
    /// Unix timestamp of creation.
    #[serde(default)]
    pub created_at: i64,
    /// Size/stock rows.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Create a product without variants or price.
    pub fn new(id: ProductId, sku: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            sku: sku.into(),
            name: name.into(),
            brand: None,
            price: None,
            description: None,
            total_stock: 0,
            created_at: 0,
            variants: Vec::new(),
        }
    }

    /// Check if this product is sold by size.
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Units on hand across all sizes.
    pub fn stock_on_hand(&self) -> i64 {
        if self.has_variants() {
            calc_total_stock(&self.variants)
        } else {
            self.total_stock.max(0)
        }
    }

    /// Find a variant by its size code.
    pub fn variant(&self, size: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.size == size)
    }

    /// Variants that can currently be purchased.
    pub fn available_variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter().filter(|v| v.is_available())
    }

    /// Build the cart line for `quantity` units of `size`.
    ///
    /// The line snapshots the product name, SKU and price, and takes the
    /// variant's current stock as its ceiling.
    pub fn line_item(&self, size: Option<&str>, quantity: i64) -> Result<CartLineItem, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        let (variant_key, stock) = match size {
            Some(size) => {
                let variant = self.variant(size).ok_or_else(|| CommerceError::VariantNotFound {
                    sku: self.sku.clone(),
                    size: size.to_string(),
                })?;
                (Some(VariantKey::new(size)), variant.stock.max(0))
            }
            None if self.has_variants() => {
                return Err(CommerceError::VariantRequired(self.sku.clone()));
            }
            None => (None, self.stock_on_hand()),
        };

        if stock == 0 {
            return Err(CommerceError::OutOfStock {
                sku: self.sku.clone(),
                size: size.unwrap_or_default().to_string(),
            });
        }
        if quantity > stock {
            return Err(CommerceError::InsufficientInventory {
                product_id: self.sku.clone(),
                requested: quantity,
                available: stock,
            });
        }

        let mut item = CartLineItem::new(self.id, self.name.clone(), quantity, stock)
            .with_sku(self.sku.clone());
        if let Some(key) = variant_key {
            item = item.with_variant(key);
        }
        if let Some(price) = self.price {
            item = item.with_unit_price(price);
        }
        Ok(item)
    }
}

/// A size of a product with its own stock count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    /// Primary key of the stock row.
    pub id: VariantId,
    /// Visible size code ("S", "M", "30", ...).
    pub size: String,
    /// Units in stock.
    pub stock: i64,
}

impl Variant {
    pub fn new(id: VariantId, size: impl Into<String>, stock: i64) -> Self {
        Self {
            id,
            size: size.into(),
            stock,
        }
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn shirt() -> Product {
        let mut product = Product::new(ProductId::new(1), "SHIRT-001", "Linen shirt");
        product.price = Some(Money::from_decimal(25.0, Currency::PEN));
        product.variants = vec![
            Variant::new(VariantId::new(10), "S", 0),
            Variant::new(VariantId::new(11), "M", 5),
        ];
        product
    }

    #[test]
    fn test_line_item_snapshots_product() {
        let item = shirt().line_item(Some("M"), 2).unwrap();
        assert_eq!(item.product_id, ProductId::new(1));
        assert_eq!(item.product_name, "Linen shirt");
        assert_eq!(item.sku, "SHIRT-001");
        assert_eq!(item.variant_key, Some(VariantKey::new("M")));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.stock_ceiling, 5);
        assert_eq!(item.unit_price, Some(Money::new(2500, Currency::PEN)));
    }

    #[test]
    fn test_line_item_unknown_size() {
        let result = shirt().line_item(Some("XL"), 1);
        assert!(matches!(result, Err(CommerceError::VariantNotFound { .. })));
    }

    #[test]
    fn test_line_item_out_of_stock_size() {
        let result = shirt().line_item(Some("S"), 1);
        assert!(matches!(result, Err(CommerceError::OutOfStock { .. })));
    }

    #[test]
    fn test_line_item_more_than_stock() {
        let result = shirt().line_item(Some("M"), 6);
        assert!(matches!(
            result,
            Err(CommerceError::InsufficientInventory { requested: 6, available: 5, .. })
        ));
    }

    #[test]
    fn test_line_item_requires_size_when_sold_by_size() {
        let result = shirt().line_item(None, 1);
        assert!(matches!(result, Err(CommerceError::VariantRequired(_))));
    }

    #[test]
    fn test_line_item_without_variants_uses_product_stock() {
        let mut mug = Product::new(ProductId::new(2), "MUG-001", "Mug");
        mug.total_stock = 3;

        let item = mug.line_item(None, 1).unwrap();
        assert_eq!(item.variant_key, None);
        assert_eq!(item.stock_ceiling, 3);
        assert_eq!(item.unit_price, None);
    }

    #[test]
    fn test_line_item_rejects_zero_quantity() {
        let result = shirt().line_item(Some("M"), 0);
        assert!(matches!(result, Err(CommerceError::InvalidQuantity(0))));
    }

    #[test]
    fn test_available_variants() {
        let product = shirt();
        let sizes: Vec<&str> = product.available_variants().map(|v| v.size.as_str()).collect();
        assert_eq!(sizes, vec!["M"]);
        assert_eq!(product.stock_on_hand(), 5);
    }
}
