//! HTTP handlers for the catalog. Each endpoint is a direct pass-through
//! query; the only request-side logic is identifier validation.

use axum::extract::Path;
use axum::{Extension, Json};
use surrealdb::engine::any::Any;
use surrealdb::Surreal;
use uuid::Uuid;

use bookstall_http::error::AppError;

use super::models::{Book, Review};
use super::store;

/// Record keys are UUIDs minted at insert time. Anything that does not parse
/// as one is a malformed identifier (400), which is a different condition
/// from a well-formed key that matches nothing (404).
fn parse_book_id(raw: &str) -> Result<String, AppError> {
    Uuid::try_parse(raw)
        .map(|id| id.simple().to_string())
        .map_err(|_| AppError::bad_request(format!("Invalid book id format: '{raw}'")))
}

/// GET /: all books in the catalog.
pub(super) async fn list_books(
    Extension(db): Extension<Surreal<Any>>,
) -> Result<Json<Vec<Book>>, AppError> {
    let records = store::list_books(&db).await?;
    Ok(Json(records.into_iter().map(Book::from).collect()))
}

/// GET /{id}: one book by id.
pub(super) async fn get_book(
    Extension(db): Extension<Surreal<Any>>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let key = parse_book_id(&id)?;

    let record = store::get_book(&db, &key)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Book with id {id} not found")))?;

    Ok(Json(record.into()))
}

/// GET /{id}/reviews: all reviews for one book. An empty array is a normal
/// answer, not an error.
pub(super) async fn list_book_reviews(
    Extension(db): Extension<Surreal<Any>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Review>>, AppError> {
    let key = parse_book_id(&id)?;

    let records = store::reviews_for_book(&db, &key).await?;
    Ok(Json(records.into_iter().map(Review::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use bookstall_kernel::{Module, ModuleRegistry};
    use chrono::{TimeZone, Utc};
    use tower::ServiceExt;

    use crate::modules::books::models::{BookContent, BookRecord, ReviewContent, ReviewRecord};

    const BOOK_KEY: &str = "0192b1dca6127000a000000000000001";

    async fn test_router() -> axum::Router {
        let db = bookstall_db::open("mem://", "test", "routes").await.unwrap();

        let mut registry = ModuleRegistry::new();
        registry.register(books::create_module());
        bookstall_db::apply_migrations(&db, &registry).await.unwrap();

        let created: Option<BookRecord> = db
            .create((store::BOOK_TABLE, BOOK_KEY))
            .content(BookContent {
                title: "The Dispossessed".to_string(),
                author: "Ursula K. Le Guin".to_string(),
                description: "Two worlds, one wall.".to_string(),
                price: 12.5,
                image: "/images/dispossessed.jpg".to_string(),
                isbn: "978-0061054884".to_string(),
                genre: vec!["Science Fiction".to_string()],
                tags: vec!["utopia".to_string()],
                published: Utc.with_ymd_and_hms(1974, 5, 1, 0, 0, 0).unwrap().into(),
                pages: 387,
                language: "English".to_string(),
                publisher: "Harper & Row".to_string(),
                rating: 4.2,
                review_count: 1,
                in_stock: true,
                featured: false,
            })
            .await
            .unwrap();
        let book = created.unwrap();

        let _review: Option<ReviewRecord> = db
            .create(store::REVIEW_TABLE)
            .content(ReviewContent {
                book: book.id,
                author: "A reader".to_string(),
                rating: 4,
                title: "Thoughtful".to_string(),
                comment: "Slow start, strong finish.".to_string(),
                posted_at: Some(Utc.with_ymd_and_hms(2024, 2, 2, 8, 0, 0).unwrap().into()),
                verified: true,
            })
            .await
            .unwrap();

        books::BooksModule::new()
            .routes()
            .layer(axum::Extension(db))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn list_books_returns_the_catalog() {
        let router = test_router().await;

        let response = router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["title"], "The Dispossessed");
        assert_eq!(json[0]["id"], BOOK_KEY);
    }

    #[tokio::test]
    async fn get_book_round_trips_by_id() {
        let router = test_router().await;

        let response = router
            .oneshot(
                Request::get(format!("/{BOOK_KEY}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["id"], BOOK_KEY);
        assert_eq!(json["inStock"], true);
    }

    #[tokio::test]
    async fn malformed_id_is_a_400_not_a_404() {
        let router = test_router().await;

        let response = router
            .oneshot(Request::get("/abc123").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn missing_book_with_valid_id_is_a_404() {
        let router = test_router().await;

        let response = router
            .oneshot(
                Request::get("/ffffffffffffffffffffffffffffffff")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn reviews_endpoint_returns_reviews_for_the_book() {
        let router = test_router().await;

        let response = router
            .oneshot(
                Request::get(format!("/{BOOK_KEY}/reviews"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["bookId"], BOOK_KEY);
        assert_eq!(json[0]["rating"], 4);
    }

    #[tokio::test]
    async fn reviews_for_reviewless_book_are_an_empty_array() {
        let router = test_router().await;

        let response = router
            .oneshot(
                Request::get("/ffffffffffffffffffffffffffffffff/reviews")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn malformed_id_on_reviews_is_a_400() {
        let router = test_router().await;

        let response = router
            .oneshot(
                Request::get("/not-a-uuid/reviews")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn hyphenated_and_simple_uuid_forms_normalize_to_the_same_key() {
        let simple = parse_book_id("0192b1dca6127000a000000000000001").unwrap();
        let hyphenated = parse_book_id("0192b1dc-a612-7000-a000-000000000001").unwrap();
        assert_eq!(simple, hyphenated);
    }
}
