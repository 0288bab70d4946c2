//! Product catalog module.
//!
//! Contains product, variant and stock types plus the lookup seam used by
//! the scan flow.

mod product;
mod source;
mod stock;

pub use product::{Product, Variant};
pub use source::{CatalogFile, CatalogSource, InMemoryCatalog};
pub use stock::calc_total_stock;
