//! Durable key-value storage for qrshop.
//!
//! Provides a small, synchronous API for keeping named JSON records either in
//! memory or on disk, the way a browser keeps records in local storage.
//!
//! # Example
//!
//! ```rust,ignore
//! use qrshop_storage::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct CartRecord {
//!     items: Vec<CartLineItem>,
//! }
//!
//! let mut cache = Cache::open(".qrshop")?;
//!
//! // Store a value
//! cache.set("cart-storage", &record)?;
//!
//! // Retrieve a value
//! let record: Option<CartRecord> = cache.get("cart-storage")?;
//!
//! // Delete a value
//! cache.delete("cart-storage")?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::StorageError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, FileStore, KeyValueStore, MemoryStore, StorageError};
}
