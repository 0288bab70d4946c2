//! Catalog lookup.

use std::path::Path;

use crate::catalog::Product;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Read access to the product catalog.
///
/// The storefront queries products by the SKU scanned from a QR label and
/// lists them for browsing. Backends are free to hit a remote database; the
/// cart never talks to the catalog directly.
pub trait CatalogSource {
    /// Look up a product and its size/stock rows by SKU.
    fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, CommerceError>;

    /// All products, newest first.
    fn list_products(&self) -> Result<Vec<Product>, CommerceError>;
}

impl<C: CatalogSource + ?Sized> CatalogSource for &C {
    fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, CommerceError> {
        (**self).find_by_sku(sku)
    }

    fn list_products(&self) -> Result<Vec<Product>, CommerceError> {
        (**self).list_products()
    }
}

/// On-disk catalog layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Catalog held in memory, typically loaded from a JSON export.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a `{ "products": [...] }` document.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file.products))
    }

    /// Load a catalog file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CommerceError::Catalog(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Add or replace a product, matching on SKU.
    pub fn upsert(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.sku == product.sku) {
            Some(existing) => *existing = product,
            None => self.products.push(product),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogSource for InMemoryCatalog {
    fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, CommerceError> {
        Ok(self.products.iter().find(|p| p.sku == sku).cloned())
    }

    fn list_products(&self) -> Result<Vec<Product>, CommerceError> {
        let mut products = self.products.clone();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    const CATALOG: &str = r#"{
        "products": [
            {
                "id": 1,
                "sku": "SHIRT-001",
                "name": "Linen shirt",
                "price": { "amount_cents": 2500, "currency": "PEN" },
                "created_at": 100,
                "variants": [
                    { "id": 10, "size": "M", "stock": 5 },
                    { "id": 11, "size": "L", "stock": 2 }
                ]
            },
            {
                "id": 2,
                "sku": "MUG-001",
                "name": "Mug",
                "total_stock": 4,
                "created_at": 200
            }
        ]
    }"#;

    #[test]
    fn test_from_json_and_find() {
        let catalog = InMemoryCatalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let shirt = catalog.find_by_sku("SHIRT-001").unwrap().unwrap();
        assert_eq!(shirt.id, ProductId::new(1));
        assert_eq!(shirt.stock_on_hand(), 7);

        assert!(catalog.find_by_sku("NOPE").unwrap().is_none());
    }

    #[test]
    fn test_list_newest_first() {
        let catalog = InMemoryCatalog::from_json(CATALOG).unwrap();
        let skus: Vec<String> = catalog
            .list_products()
            .unwrap()
            .into_iter()
            .map(|p| p.sku)
            .collect();
        assert_eq!(skus, vec!["MUG-001", "SHIRT-001"]);
    }

    #[test]
    fn test_upsert_replaces_by_sku() {
        let mut catalog = InMemoryCatalog::default();
        catalog.upsert(Product::new(ProductId::new(1), "A", "First"));
        catalog.upsert(Product::new(ProductId::new(1), "A", "Renamed"));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find_by_sku("A").unwrap().unwrap().name, "Renamed");
    }

    #[test]
    fn test_load_missing_file() {
        let result = InMemoryCatalog::load("/nonexistent/catalog.json");
        assert!(matches!(result, Err(CommerceError::Catalog(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap();

        let catalog = InMemoryCatalog::load(&path).unwrap();
        assert!(!catalog.is_empty());
    }
}
