//! Commerce error types.

use qrshop_storage::StorageError;
use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Stock rejections inside the cart store are not errors; they are reported
/// through [`AddOutcome`](crate::cart::AddOutcome).
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Variant not found.
    #[error("Variant not found: size {size} of {sku}")]
    VariantNotFound { sku: String, size: String },

    /// A product with variants was added without choosing one.
    #[error("A size must be selected for {0}")]
    VariantRequired(String),

    /// Variant has no stock at all.
    #[error("Out of stock: size {size} of {sku}")]
    OutOfStock { sku: String, size: String },

    /// Insufficient inventory.
    #[error("Insufficient inventory for {product_id}: requested {requested}, available {available}")]
    InsufficientInventory {
        product_id: String,
        requested: i64,
        available: i64,
    },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Catalog could not be read.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Durable storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
