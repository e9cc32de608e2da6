use crate::api::{ApiClient, ClientError};
use crate::cart::{Cart, CartError, CartItem, CartStore};
use crate::model::{Book, Review};
use crate::stars::StarRating;

/// A review paired with its star display.
#[derive(Debug, Clone)]
pub struct ReviewDisplay {
    pub review: Review,
    pub stars: StarRating,
}

/// The book detail page: one book, its reviews, and the add-to-cart action.
#[derive(Debug, Clone)]
pub struct BookDetailPage {
    pub book: Book,
    pub stars: StarRating,
    pub reviews: Vec<ReviewDisplay>,
}

impl BookDetailPage {
    /// Fetch the book and its reviews concurrently; the page needs both
    /// before it can render.
    pub async fn load(api: &ApiClient, id: &str) -> Result<Self, ClientError> {
        let (book, reviews) = tokio::try_join!(api.get_book(id), api.reviews_for_book(id))?;

        let stars = StarRating::from_rating(book.rating);
        let reviews = reviews
            .into_iter()
            .map(|review| ReviewDisplay {
                stars: StarRating::from_rating(f64::from(review.rating)),
                review,
            })
            .collect();

        Ok(Self {
            book,
            stars,
            reviews,
        })
    }

    /// Put this book in the cart.
    pub fn add_to_cart<S: CartStore>(
        &self,
        cart: &Cart<S>,
        quantity: u32,
    ) -> Result<CartItem, CartError> {
        cart.add(&self.book.id, quantity)
    }
}
