use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;
use surrealdb::RecordId;

/// A catalog entry as stored in the `book` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: RecordId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub isbn: String,
    pub genre: Vec<String>,
    pub tags: Vec<String>,
    pub published: Datetime,
    pub pages: u32,
    pub language: String,
    pub publisher: String,
    pub rating: f64,
    pub review_count: u32,
    pub in_stock: bool,
    pub featured: bool,
}

/// Field set for inserting a book; the record key is chosen by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookContent {
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub isbn: String,
    pub genre: Vec<String>,
    pub tags: Vec<String>,
    pub published: Datetime,
    pub pages: u32,
    pub language: String,
    pub publisher: String,
    pub rating: f64,
    pub review_count: u32,
    pub in_stock: bool,
    pub featured: bool,
}

/// A reader review as stored in the `review` table, linked to its book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: RecordId,
    pub book: RecordId,
    pub author: String,
    pub rating: u8,
    pub title: String,
    pub comment: String,
    pub posted_at: Datetime,
    pub verified: bool,
}

/// Field set for inserting a review. A missing `posted_at` falls back to the
/// table default (creation time).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewContent {
    pub book: RecordId,
    pub author: String,
    pub rating: u8,
    pub title: String,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<Datetime>,
    #[serde(default)]
    pub verified: bool,
}

/// Wire representation of a book. Record keys flatten to plain strings and
/// datetimes to RFC 3339.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub isbn: String,
    pub genre: Vec<String>,
    pub tags: Vec<String>,
    pub date_published: String,
    pub pages: u32,
    pub language: String,
    pub publisher: String,
    pub rating: f64,
    pub review_count: u32,
    pub in_stock: bool,
    pub featured: bool,
}

impl From<BookRecord> for Book {
    fn from(record: BookRecord) -> Self {
        Self {
            id: record.id.key().to_string(),
            title: record.title,
            author: record.author,
            description: record.description,
            price: record.price,
            image: record.image,
            isbn: record.isbn,
            genre: record.genre,
            tags: record.tags,
            date_published: record.published.0.to_rfc3339(),
            pages: record.pages,
            language: record.language,
            publisher: record.publisher,
            rating: record.rating,
            review_count: record.review_count,
            in_stock: record.in_stock,
            featured: record.featured,
        }
    }
}

/// Wire representation of a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub book_id: String,
    pub author: String,
    pub rating: u8,
    pub title: String,
    pub comment: String,
    pub timestamp: String,
    pub verified: bool,
}

impl From<ReviewRecord> for Review {
    fn from(record: ReviewRecord) -> Self {
        Self {
            id: record.id.key().to_string(),
            book_id: record.book.key().to_string(),
            author: record.author,
            rating: record.rating,
            title: record.title,
            comment: record.comment,
            timestamp: record.posted_at.0.to_rfc3339(),
            verified: record.verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_record() -> BookRecord {
        BookRecord {
            id: RecordId::from_table_key("book", "0192b1dca6127000a000000000000000"),
            title: "The Left Hand of Darkness".to_string(),
            author: "Ursula K. Le Guin".to_string(),
            description: "An envoy alone on a glacial world.".to_string(),
            price: 14.99,
            image: "/images/left-hand-of-darkness.jpg".to_string(),
            isbn: "978-0441478125".to_string(),
            genre: vec!["Science Fiction".to_string()],
            tags: vec!["classic".to_string()],
            published: Utc.with_ymd_and_hms(1969, 3, 1, 0, 0, 0).unwrap().into(),
            pages: 304,
            language: "English".to_string(),
            publisher: "Ace Books".to_string(),
            rating: 4.5,
            review_count: 2,
            in_stock: true,
            featured: true,
        }
    }

    #[test]
    fn book_wire_shape_is_camel_case_with_string_id() {
        let book = Book::from(sample_record());
        let json = serde_json::to_value(&book).unwrap();

        assert_eq!(json["id"], "0192b1dca6127000a000000000000000");
        assert_eq!(json["datePublished"], "1969-03-01T00:00:00+00:00");
        assert_eq!(json["reviewCount"], 2);
        assert_eq!(json["inStock"], true);
    }

    #[test]
    fn review_wire_shape_links_back_to_its_book() {
        let record = ReviewRecord {
            id: RecordId::from_table_key("review", "r1"),
            book: RecordId::from_table_key("book", "b1"),
            author: "A reader".to_string(),
            rating: 5,
            title: "Superb".to_string(),
            comment: "Read it twice.".to_string(),
            posted_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap().into(),
            verified: true,
        };

        let review = Review::from(record);
        assert_eq!(review.book_id, "b1");

        let json = serde_json::to_value(&review).unwrap();
        assert_eq!(json["bookId"], "b1");
        assert_eq!(json["timestamp"], "2024-05-01T12:00:00+00:00");
    }
}
