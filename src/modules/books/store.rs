//! Datastore queries for the catalog. Each function is a single query
//! against the shared connection; failures surface to the caller untouched.

use anyhow::Context;
use surrealdb::engine::any::Any;
use surrealdb::{RecordId, Surreal};

use super::models::{BookRecord, ReviewRecord};

pub const BOOK_TABLE: &str = "book";
pub const REVIEW_TABLE: &str = "review";

/// Fetch every book in the catalog. No filtering, pagination, or ordering.
pub async fn list_books(db: &Surreal<Any>) -> anyhow::Result<Vec<BookRecord>> {
    db.select(BOOK_TABLE).await.context("listing books")
}

/// Fetch one book by its record key. `None` when no such book exists.
pub async fn get_book(db: &Surreal<Any>, key: &str) -> anyhow::Result<Option<BookRecord>> {
    db.select((BOOK_TABLE, key))
        .await
        .with_context(|| format!("fetching book '{key}'"))
}

/// Fetch all reviews linked to a book. An empty result is a valid answer:
/// the book may simply have no reviews.
pub async fn reviews_for_book(db: &Surreal<Any>, key: &str) -> anyhow::Result<Vec<ReviewRecord>> {
    let book = RecordId::from_table_key(BOOK_TABLE, key);

    let mut response = db
        .query("SELECT * FROM review WHERE book = $book")
        .bind(("book", book))
        .await
        .with_context(|| format!("fetching reviews for book '{key}'"))?;

    response
        .take(0)
        .with_context(|| format!("decoding reviews for book '{key}'"))
}
