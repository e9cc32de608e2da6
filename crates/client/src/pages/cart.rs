use std::collections::{BTreeSet, HashMap};

use futures::future::join_all;

use crate::api::ApiClient;
use crate::cart::{Cart, CartError, CartItem, CartStore};
use crate::model::Book;

/// One display row of the cart. A line whose book could not be resolved
/// stays in the list flagged unavailable and contributes nothing to totals.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub item: CartItem,
    pub title: Option<String>,
    pub author: Option<String>,
    pub unit_price: f64,
    pub line_total: f64,
    pub available: bool,
}

/// The cart page: stored line items hydrated with live book data.
#[derive(Debug, Clone)]
pub struct CartPage {
    pub lines: Vec<CartLine>,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
}

impl CartPage {
    /// Load the stored cart and re-fetch current book data for every unique
    /// book id concurrently. Prices shown are whatever the catalog says
    /// right now, not what the book cost when it was added.
    pub async fn load<S: CartStore>(cart: &Cart<S>, api: &ApiClient) -> Result<Self, CartError> {
        let items = cart.items()?;

        let unique_ids: BTreeSet<&str> = items.iter().map(|item| item.book_id.as_str()).collect();

        let fetches = unique_ids.into_iter().map(|id| async move {
            match api.get_book(id).await {
                Ok(book) => Some((id.to_string(), book)),
                Err(err) => {
                    tracing::warn!(
                        book_id = %id,
                        error = %err,
                        "cart line failed to resolve; it will display as unavailable"
                    );
                    None
                }
            }
        });

        let resolved: HashMap<String, Book> =
            join_all(fetches).await.into_iter().flatten().collect();

        Ok(Self::from_parts(items, &resolved))
    }

    /// Assemble display rows and totals from stored items and whatever books
    /// resolved. Shipping is always free, so the order total is the subtotal.
    pub fn from_parts(items: Vec<CartItem>, resolved: &HashMap<String, Book>) -> Self {
        let mut subtotal = 0.0;

        let lines: Vec<CartLine> = items
            .into_iter()
            .map(|item| match resolved.get(&item.book_id) {
                Some(book) => {
                    let line_total = book.price * f64::from(item.quantity);
                    subtotal += line_total;
                    CartLine {
                        title: Some(book.title.clone()),
                        author: Some(book.author.clone()),
                        unit_price: book.price,
                        line_total,
                        available: true,
                        item,
                    }
                }
                None => CartLine {
                    title: None,
                    author: None,
                    unit_price: 0.0,
                    line_total: 0.0,
                    available: false,
                    item,
                },
            })
            .collect();

        Self {
            lines,
            subtotal,
            shipping: 0.0,
            total: subtotal,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, book_id: &str, quantity: u32) -> CartItem {
        CartItem {
            id: id.to_string(),
            book_id: book_id.to_string(),
            quantity,
            added_at: "2024-06-01T09:00:00Z".to_string(),
        }
    }

    fn book(id: &str, price: f64) -> Book {
        Book {
            id: id.to_string(),
            title: format!("Title {id}"),
            author: "Author".to_string(),
            description: String::new(),
            price,
            image: String::new(),
            isbn: "978-0".to_string(),
            genre: vec![],
            tags: vec![],
            date_published: "2000-01-01T00:00:00+00:00".to_string(),
            pages: 100,
            language: "English".to_string(),
            publisher: "Pub".to_string(),
            rating: 4.0,
            review_count: 0,
            in_stock: true,
            featured: false,
        }
    }

    #[test]
    fn totals_sum_price_times_quantity_over_resolved_lines() {
        let items = vec![item("a", "b1", 2), item("b", "b2", 1)];
        let resolved: HashMap<String, Book> = [
            ("b1".to_string(), book("b1", 10.0)),
            ("b2".to_string(), book("b2", 5.5)),
        ]
        .into();

        let page = CartPage::from_parts(items, &resolved);

        assert_eq!(page.subtotal, 25.5);
        assert_eq!(page.shipping, 0.0);
        assert_eq!(page.total, page.subtotal);
    }

    #[test]
    fn unresolved_lines_stay_listed_at_price_zero() {
        let items = vec![item("a", "b1", 2), item("b", "gone", 3)];
        let resolved: HashMap<String, Book> = [("b1".to_string(), book("b1", 10.0))].into();

        let page = CartPage::from_parts(items, &resolved);

        assert_eq!(page.lines.len(), 2);
        let missing = &page.lines[1];
        assert!(!missing.available);
        assert_eq!(missing.unit_price, 0.0);
        assert_eq!(missing.line_total, 0.0);
        assert!(missing.title.is_none());

        // The dead line contributes nothing to the total.
        assert_eq!(page.total, 20.0);
    }

    #[test]
    fn empty_cart_totals_to_zero() {
        let page = CartPage::from_parts(vec![], &HashMap::new());
        assert!(page.is_empty());
        assert_eq!(page.total, 0.0);
    }
}
