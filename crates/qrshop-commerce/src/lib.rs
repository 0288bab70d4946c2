//! Storefront domain types and logic for qrshop.
//!
//! - **Catalog**: products, per-size stock, SKU lookup
//! - **Cart**: line items merged by (product, size), stock ceilings, a store
//!   that persists itself after every change
//! - **Scan**: decoded QR text to product to cart line
//!
//! # Example
//!
//! ```rust,ignore
//! use qrshop_commerce::prelude::*;
//!
//! let catalog = InMemoryCatalog::load("catalog.json")?;
//! let mut scanner = ScanHandler::new(&catalog);
//! let product = scanner.on_decoded(decoded_text)?;
//!
//! let mut store = CartStore::load(Cache::open(".qrshop")?, DEFAULT_STORAGE_KEY, Currency::PEN)?;
//! match store.add_item(product.line_item(Some("M"), 2)?)? {
//!     AddOutcome::Rejected(reason) => println!("{}", reason),
//!     _ => println!("Total: {}", store.get_total()),
//! }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod scan;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{calc_total_stock, CatalogSource, InMemoryCatalog, Product, Variant};

    // Cart
    pub use crate::cart::{
        AddOutcome, Cart, CartLineItem, CartRecord, CartStore, LineKey, Rejection, SubscriptionId,
        UpdateOutcome, DEFAULT_STORAGE_KEY,
    };

    // Scan
    pub use crate::scan::{ScanError, ScanHandler, Sku};

    pub use qrshop_storage::Cache;
}
