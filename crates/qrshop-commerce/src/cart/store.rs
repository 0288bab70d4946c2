//! Cart store: the cart plus durable persistence and change notification.

use std::fmt;

use crate::cart::{AddOutcome, Cart, CartLineItem, LineKey, UpdateOutcome};
use crate::error::CommerceError;
use crate::ids::{ProductId, VariantKey};
use crate::money::{Currency, Money};
use qrshop_storage::{Cache, KeyValueStore, MemoryStore, StorageError};
use serde::{Deserialize, Serialize};

/// Storage key the cart record lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "cart-storage";

/// The persisted record: `{ "items": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartRecord {
    #[serde(default)]
    pub items: Vec<CartLineItem>,
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Cart)>;

/// Owns the shopper's cart and keeps it in durable storage.
///
/// Every operation that changes the cart writes the full record under the
/// store key and then notifies subscribers, in that order. Operations that
/// leave the cart as it was do neither.
pub struct CartStore<S: KeyValueStore = MemoryStore> {
    cart: Cart,
    cache: Cache<S>,
    key: String,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl CartStore<MemoryStore> {
    /// Empty store backed by volatile memory.
    pub fn in_memory(currency: Currency) -> Self {
        Self::with_cart(Cart::new(currency), Cache::in_memory(), DEFAULT_STORAGE_KEY)
    }
}

impl<S: KeyValueStore> CartStore<S> {
    /// Rehydrate the cart stored under `key`, or start empty.
    ///
    /// A record that cannot be parsed is discarded with a warning; failures
    /// of the storage itself are returned.
    pub fn load(cache: Cache<S>, key: impl Into<String>, currency: Currency) -> Result<Self, CommerceError> {
        let key = key.into();
        let record = match cache.get::<CartRecord>(&key) {
            Ok(record) => record.unwrap_or_default(),
            Err(StorageError::SerializeError(e)) => {
                tracing::warn!(key = %key, error = %e, "discarding unreadable cart record");
                CartRecord::default()
            }
            Err(e) => return Err(e.into()),
        };

        let cart = Cart::from_items(record.items, currency);
        tracing::debug!(key = %key, lines = cart.unique_item_count(), "cart rehydrated");
        Ok(Self::with_cart(cart, cache, key))
    }

    fn with_cart(cart: Cart, cache: Cache<S>, key: impl Into<String>) -> Self {
        Self {
            cart,
            cache,
            key: key.into(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Add a line, merging by (product, size).
    ///
    /// Stock rejections are reported in the outcome, not as errors.
    pub fn add_item(&mut self, item: CartLineItem) -> Result<AddOutcome, CommerceError> {
        let outcome = self.cart.add_item(item);
        if outcome.is_applied() {
            self.commit()?;
        }
        Ok(outcome)
    }

    /// Set a line's quantity, clamped to `1..=stock_ceiling`.
    pub fn update_qty(
        &mut self,
        product_id: ProductId,
        variant_key: Option<&VariantKey>,
        quantity: i64,
    ) -> Result<UpdateOutcome, CommerceError> {
        let outcome = self.cart.update_qty(product_id, variant_key, quantity);
        if outcome.is_applied() {
            self.commit()?;
        }
        Ok(outcome)
    }

    /// Remove a line if present.
    pub fn remove_item(
        &mut self,
        product_id: ProductId,
        variant_key: Option<&VariantKey>,
    ) -> Result<bool, CommerceError> {
        let removed = self.cart.remove_item(product_id, variant_key);
        if removed {
            self.commit()?;
        }
        Ok(removed)
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        if self.cart.clear() {
            self.commit()?;
        }
        Ok(())
    }

    /// Sum of `unit_price * quantity` over all lines.
    pub fn get_total(&self) -> Money {
        self.cart.total()
    }

    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    pub fn get_item(&self, key: &LineKey) -> Option<&CartLineItem> {
        self.cart.get_item(key)
    }

    /// Units in the cart, as shown on the cart badge.
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Consume the store and hand back its storage.
    pub fn into_cache(self) -> Cache<S> {
        self.cache
    }

    /// Register a callback run after every persisted change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Cart) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drop a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() < len_before
    }

    fn commit(&mut self) -> Result<(), CommerceError> {
        let record = CartRecord {
            items: self.cart.items().to_vec(),
        };
        self.cache.set(&self.key, &record)?;
        tracing::debug!(key = %self.key, lines = record.items.len(), "cart persisted");

        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.cart);
        }
        Ok(())
    }
}

impl<S: KeyValueStore> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("cart", &self.cart)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
