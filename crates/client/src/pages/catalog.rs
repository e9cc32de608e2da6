use crate::api::{ApiClient, ClientError};
use crate::model::Book;

/// The storefront landing page: the full catalog as a grid.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub books: Vec<Book>,
}

impl CatalogPage {
    pub async fn load(api: &ApiClient) -> Result<Self, ClientError> {
        let books = api.list_books().await?;
        Ok(Self { books })
    }

    /// Titles highlighted at the top of the page.
    pub fn featured(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().filter(|book| book.featured)
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
