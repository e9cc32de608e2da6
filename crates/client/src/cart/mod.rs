//! The shopping cart: a client-held sequence of line items.
//!
//! Every mutation loads the current sequence, rewrites it, saves the whole
//! thing back, and broadcasts an update so other open views re-render from
//! storage.

pub mod storage;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::sync::broadcast;
use uuid::Uuid;

use bookstall_events::EventBus;

pub use storage::{CartStore, JsonFileStore, MemoryStore, StorageError};

const MIN_QUANTITY: u32 = 1;

/// One line of the cart. References a book by id; the book itself is looked
/// up live when the cart is displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub book_id: String,
    pub quantity: u32,
    pub added_at: String,
}

/// Broadcast whenever the stored cart changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    Updated,
}

#[derive(Error, Debug)]
pub enum CartError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Cart operations over a pluggable store.
pub struct Cart<S: CartStore> {
    store: S,
    events: EventBus<CartEvent>,
}

impl<S: CartStore> Cart<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            events: EventBus::new(),
        }
    }

    /// Current line items in insertion order.
    pub fn items(&self) -> Result<Vec<CartItem>, CartError> {
        Ok(self.store.load()?)
    }

    /// Listen for cart changes made through this instance.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Add a book to the cart. An existing line for the same book absorbs
    /// the quantity instead of creating a duplicate line.
    pub fn add(&self, book_id: &str, quantity: u32) -> Result<CartItem, CartError> {
        let quantity = quantity.max(MIN_QUANTITY);
        let mut items = self.store.load()?;

        let item = match items.iter_mut().find(|item| item.book_id == book_id) {
            Some(existing) => {
                existing.quantity += quantity;
                existing.clone()
            }
            None => {
                let item = CartItem {
                    id: Uuid::now_v7().simple().to_string(),
                    book_id: book_id.to_string(),
                    quantity,
                    added_at: now_rfc3339(),
                };
                items.push(item.clone());
                item
            }
        };

        self.commit(&items)?;
        Ok(item)
    }

    /// Set a line's quantity, clamped to a minimum of 1. Unknown line ids
    /// leave the cart unchanged.
    pub fn set_quantity(&self, item_id: &str, quantity: u32) -> Result<(), CartError> {
        let quantity = quantity.max(MIN_QUANTITY);
        let mut items = self.store.load()?;

        if let Some(item) = items.iter_mut().find(|item| item.id == item_id) {
            item.quantity = quantity;
        }

        self.commit(&items)
    }

    /// Remove a line from the cart.
    pub fn remove(&self, item_id: &str) -> Result<(), CartError> {
        let mut items = self.store.load()?;
        items.retain(|item| item.id != item_id);
        self.commit(&items)
    }

    /// Drop every line.
    pub fn clear(&self) -> Result<(), CartError> {
        self.store.clear()?;
        self.events.publish(CartEvent::Updated);
        Ok(())
    }

    fn commit(&self, items: &[CartItem]) -> Result<(), CartError> {
        self.store.save(items)?;
        self.events.publish(CartEvent::Updated);
        Ok(())
    }
}

fn now_rfc3339() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339).unwrap_or_else(|_| now.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart() -> Cart<MemoryStore> {
        Cart::new(MemoryStore::new())
    }

    #[test]
    fn adding_a_new_book_creates_a_line() {
        let cart = cart();
        let item = cart.add("book-1", 2).unwrap();

        assert_eq!(item.book_id, "book-1");
        assert_eq!(item.quantity, 2);
        assert_eq!(cart.items().unwrap().len(), 1);
    }

    #[test]
    fn adding_the_same_book_merges_quantities() {
        let cart = cart();
        cart.add("book-1", 1).unwrap();
        let merged = cart.add("book-1", 3).unwrap();

        assert_eq!(merged.quantity, 4);
        assert_eq!(cart.items().unwrap().len(), 1);
    }

    #[test]
    fn quantity_edits_clamp_to_one() {
        let cart = cart();
        let item = cart.add("book-1", 5).unwrap();

        cart.set_quantity(&item.id, 0).unwrap();
        assert_eq!(cart.items().unwrap()[0].quantity, 1);

        cart.set_quantity(&item.id, 3).unwrap();
        assert_eq!(cart.items().unwrap()[0].quantity, 3);
    }

    #[test]
    fn adding_zero_copies_still_puts_one_in_the_cart() {
        let cart = cart();
        let item = cart.add("book-1", 0).unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn removing_a_line_keeps_the_others() {
        let cart = cart();
        let first = cart.add("book-1", 1).unwrap();
        cart.add("book-2", 1).unwrap();

        cart.remove(&first.id).unwrap();

        let items = cart.items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].book_id, "book-2");
    }

    #[test]
    fn editing_an_unknown_line_is_a_no_op() {
        let cart = cart();
        cart.add("book-1", 2).unwrap();

        cart.set_quantity("missing", 9).unwrap();
        assert_eq!(cart.items().unwrap()[0].quantity, 2);
    }

    #[tokio::test]
    async fn mutations_broadcast_an_update() {
        let cart = cart();
        let mut rx = cart.subscribe();

        cart.add("book-1", 1).unwrap();
        assert_eq!(rx.recv().await.unwrap(), CartEvent::Updated);

        cart.clear().unwrap();
        assert_eq!(rx.recv().await.unwrap(), CartEvent::Updated);
    }

    #[test]
    fn cart_items_serialize_with_camel_case_keys() {
        let cart = cart();
        let item = cart.add("book-1", 1).unwrap();

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("bookId").is_some());
        assert!(json.get("addedAt").is_some());
    }
}
