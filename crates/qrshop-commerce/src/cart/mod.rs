//! Shopping cart module.
//!
//! Contains the line item type, the cart aggregate and the persisted store.

mod cart;
mod line_item;
mod store;

pub use cart::{AddOutcome, Cart, Rejection, UpdateOutcome};
pub use line_item::{CartLineItem, LineKey};
pub use store::{CartRecord, CartStore, SubscriptionId, DEFAULT_STORAGE_KEY};
