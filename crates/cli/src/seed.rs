//! One-shot fixture loader.
//!
//! Each run is destructive-then-recreate: wipe both tables, insert the
//! bundled books, then insert reviews with their legacy book ids rewritten
//! to the freshly generated record ids. A review whose legacy id has no
//! mapping is dropped with a warning rather than failing the run; the
//! summary makes the loss visible to operators.

use std::collections::HashMap;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use surrealdb::engine::any::Any;
use surrealdb::{RecordId, Surreal};
use uuid::Uuid;

use bookstall_app::modules::books::models::{BookContent, BookRecord, ReviewContent, ReviewRecord};
use bookstall_app::modules::books::store::{BOOK_TABLE, REVIEW_TABLE};

const BOOKS_JSON: &str = include_str!("fixtures/books.json");
const REVIEWS_JSON: &str = include_str!("fixtures/reviews.json");

/// A catalog entry as shipped in the fixture file, keyed by its legacy
/// string id ("1", "2", ...).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFixture {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub isbn: String,
    pub genre: Vec<String>,
    pub tags: Vec<String>,
    pub date_published: DateTime<Utc>,
    pub pages: u32,
    pub language: String,
    pub publisher: String,
    pub rating: f64,
    pub review_count: u32,
    pub in_stock: bool,
    pub featured: bool,
}

/// A review fixture referencing its book by legacy id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFixture {
    pub book_id: String,
    pub author: String,
    pub rating: u8,
    pub title: String,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub verified: bool,
}

impl From<BookFixture> for BookContent {
    fn from(fixture: BookFixture) -> Self {
        Self {
            title: fixture.title,
            author: fixture.author,
            description: fixture.description,
            price: fixture.price,
            image: fixture.image,
            isbn: fixture.isbn,
            genre: fixture.genre,
            tags: fixture.tags,
            published: fixture.date_published.into(),
            pages: fixture.pages,
            language: fixture.language,
            publisher: fixture.publisher,
            rating: fixture.rating,
            review_count: fixture.review_count,
            in_stock: fixture.in_stock,
            featured: fixture.featured,
        }
    }
}

#[derive(Debug, Default)]
pub struct SeedSummary {
    pub books: usize,
    pub reviews: usize,
    pub dropped_reviews: usize,
}

/// Parse the bundled fixture documents.
pub fn fixtures() -> anyhow::Result<(Vec<BookFixture>, Vec<ReviewFixture>)> {
    let books = serde_json::from_str(BOOKS_JSON).context("parsing bundled book fixtures")?;
    let reviews = serde_json::from_str(REVIEWS_JSON).context("parsing bundled review fixtures")?;
    Ok((books, reviews))
}

/// Rewrite review fixtures through the legacy-id map. Unmapped reviews are
/// dropped and counted; each drop is logged with the offending id.
pub fn remap_reviews(
    fixtures: Vec<ReviewFixture>,
    ids: &HashMap<String, RecordId>,
) -> (Vec<ReviewContent>, usize) {
    let mut dropped = 0;

    let contents = fixtures
        .into_iter()
        .filter_map(|fixture| match ids.get(&fixture.book_id) {
            Some(book) => Some(ReviewContent {
                book: book.clone(),
                author: fixture.author,
                rating: fixture.rating,
                title: fixture.title,
                comment: fixture.comment,
                posted_at: Some(fixture.timestamp.into()),
                verified: fixture.verified,
            }),
            None => {
                dropped += 1;
                tracing::warn!(
                    legacy_book_id = %fixture.book_id,
                    "dropping review: legacy book id has no mapping"
                );
                None
            }
        })
        .collect();

    (contents, dropped)
}

/// Wipe and repopulate the catalog from the bundled fixtures.
pub async fn run(db: &Surreal<Any>) -> anyhow::Result<SeedSummary> {
    let (book_fixtures, review_fixtures) = fixtures()?;

    tracing::info!("clearing existing catalog data");
    let _: Vec<ReviewRecord> = db.delete(REVIEW_TABLE).await.context("clearing reviews")?;
    let _: Vec<BookRecord> = db.delete(BOOK_TABLE).await.context("clearing books")?;

    let mut ids: HashMap<String, RecordId> = HashMap::new();
    let mut summary = SeedSummary::default();

    for fixture in book_fixtures {
        let legacy_id = fixture.id.clone();
        let key = Uuid::now_v7().simple().to_string();

        let created: Option<BookRecord> = db
            .create((BOOK_TABLE, key.as_str()))
            .content(BookContent::from(fixture))
            .await
            .with_context(|| format!("inserting book fixture '{legacy_id}'"))?;
        let record =
            created.with_context(|| format!("book fixture '{legacy_id}' was not created"))?;

        ids.insert(legacy_id, record.id);
        summary.books += 1;
    }

    let (review_contents, dropped) = remap_reviews(review_fixtures, &ids);
    summary.dropped_reviews = dropped;

    for content in review_contents {
        let _: Option<ReviewRecord> = db
            .create(REVIEW_TABLE)
            .content(content)
            .await
            .context("inserting review fixture")?;
        summary.reviews += 1;
    }

    Ok(summary)
}
