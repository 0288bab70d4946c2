//! From decoded QR text to a catalog product.
//!
//! Image decoding happens outside this crate; the handler receives the text
//! a scanner produced and resolves it against the catalog.

use std::fmt;

use crate::catalog::{CatalogSource, Product};
use crate::error::CommerceError;
use thiserror::Error;

/// A SKU read from a QR label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sku(String);

impl Sku {
    /// Normalise decoded text into a SKU.
    pub fn from_decoded(text: &str) -> Result<Self, ScanError> {
        let clean = text.trim();
        if clean.is_empty() {
            return Err(ScanError::Empty);
        }
        Ok(Self(clean.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failures of the scan flow.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The scanner produced no usable text.
    #[error("Decoded QR text is empty")]
    Empty,

    /// No product carries the scanned SKU.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The catalog could not be queried.
    #[error("Catalog lookup failed: {0}")]
    Lookup(#[from] CommerceError),
}

impl ScanError {
    /// Message to show the shopper.
    pub fn user_message(&self) -> &'static str {
        match self {
            ScanError::Empty => "Invalid or empty QR code.",
            ScanError::ProductNotFound(_) => "Product not found.",
            ScanError::Lookup(_) => "Error looking up the product. Please try again.",
        }
    }

    /// Whether scanning the same code again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScanError::Lookup(_))
    }
}

/// Resolves scanned codes against a catalog and remembers the last one.
#[derive(Debug)]
pub struct ScanHandler<C> {
    catalog: C,
    last_sku: Option<Sku>,
}

impl<C: CatalogSource> ScanHandler<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            last_sku: None,
        }
    }

    /// Handle one decoded QR payload.
    pub fn on_decoded(&mut self, text: &str) -> Result<Product, ScanError> {
        let sku = Sku::from_decoded(text)?;
        self.last_sku = Some(sku.clone());

        match self.catalog.find_by_sku(sku.as_str()) {
            Ok(Some(product)) => {
                tracing::info!(sku = %sku, product_id = %product.id, "product scanned");
                Ok(product)
            }
            Ok(None) => {
                tracing::warn!(sku = %sku, "scanned SKU not in catalog");
                Err(ScanError::ProductNotFound(sku.0))
            }
            Err(e) => {
                tracing::error!(sku = %sku, error = %e, "catalog lookup failed");
                Err(ScanError::Lookup(e))
            }
        }
    }

    /// SKU of the most recent non-empty scan.
    pub fn last_sku(&self) -> Option<&Sku> {
        self.last_sku.as_ref()
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::ids::ProductId;

    struct BrokenCatalog;

    impl CatalogSource for BrokenCatalog {
        fn find_by_sku(&self, _sku: &str) -> Result<Option<Product>, CommerceError> {
            Err(CommerceError::Catalog("connection reset".to_string()))
        }

        fn list_products(&self) -> Result<Vec<Product>, CommerceError> {
            Ok(Vec::new())
        }
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![Product::new(ProductId::new(1), "SHIRT-001", "Shirt")])
    }

    #[test]
    fn test_sku_is_trimmed() {
        assert_eq!(Sku::from_decoded("  SHIRT-001\n").unwrap().as_str(), "SHIRT-001");
    }

    #[test]
    fn test_empty_text() {
        assert!(matches!(Sku::from_decoded(" \t"), Err(ScanError::Empty)));
    }

    #[test]
    fn test_on_decoded_finds_product() {
        let mut handler = ScanHandler::new(catalog());
        let product = handler.on_decoded(" SHIRT-001 ").unwrap();
        assert_eq!(product.name, "Shirt");
        assert_eq!(handler.last_sku().unwrap().as_str(), "SHIRT-001");
    }

    #[test]
    fn test_on_decoded_unknown_sku() {
        let mut handler = ScanHandler::new(catalog());
        let err = handler.on_decoded("NOPE").unwrap_err();
        assert!(matches!(err, ScanError::ProductNotFound(ref sku) if sku == "NOPE"));
        assert_eq!(err.user_message(), "Product not found.");
        assert!(!err.is_retryable());
        assert_eq!(handler.last_sku().unwrap().as_str(), "NOPE");
    }

    #[test]
    fn test_empty_scan_keeps_last_sku() {
        let mut handler = ScanHandler::new(catalog());
        handler.on_decoded("SHIRT-001").unwrap();
        assert!(handler.on_decoded("").is_err());
        assert_eq!(handler.last_sku().unwrap().as_str(), "SHIRT-001");
    }

    #[test]
    fn test_lookup_failure_is_retryable() {
        let mut handler = ScanHandler::new(BrokenCatalog);
        let err = handler.on_decoded("SHIRT-001").unwrap_err();
        assert!(err.is_retryable());
    }
}
