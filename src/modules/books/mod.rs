pub mod models;
pub mod routes;
pub mod store;

use async_trait::async_trait;
use axum::{routing::get, Router};
use bookstall_kernel::{InitCtx, Migration, Module};
use serde_json::json;

/// Catalog module: read-only books and reviews, mounted at `/api/books`.
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(routes::list_books))
            .route("/{id}", get(routes::get_book))
            .route("/{id}/reviews", get(routes::list_book_reviews))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "List of books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "500": {
                                "description": "Internal server error",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get one book",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string", "format": "uuid" }
                        }],
                        "responses": {
                            "200": {
                                "description": "The requested book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            },
                            "400": {
                                "description": "Malformed book id",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "404": {
                                "description": "No book with this id",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{id}/reviews": {
                    "get": {
                        "summary": "List reviews for a book",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string", "format": "uuid" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Reviews for the book (possibly empty)",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Review" }
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Malformed book id",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "description": { "type": "string" },
                            "price": { "type": "number", "minimum": 0 },
                            "image": { "type": "string" },
                            "isbn": { "type": "string" },
                            "genre": { "type": "array", "items": { "type": "string" } },
                            "tags": { "type": "array", "items": { "type": "string" } },
                            "datePublished": { "type": "string", "format": "date-time" },
                            "pages": { "type": "integer" },
                            "language": { "type": "string" },
                            "publisher": { "type": "string" },
                            "rating": { "type": "number", "minimum": 0, "maximum": 5 },
                            "reviewCount": { "type": "integer" },
                            "inStock": { "type": "boolean" },
                            "featured": { "type": "boolean" }
                        },
                        "required": ["id", "title", "author", "price", "isbn"]
                    },
                    "Review": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "bookId": { "type": "string" },
                            "author": { "type": "string" },
                            "rating": { "type": "integer", "minimum": 1, "maximum": 5 },
                            "title": { "type": "string" },
                            "comment": { "type": "string" },
                            "timestamp": { "type": "string", "format": "date-time" },
                            "verified": { "type": "boolean" }
                        },
                        "required": ["id", "bookId", "author", "rating"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![
            Migration {
                id: "001_book",
                up: r#"
                    DEFINE TABLE IF NOT EXISTS book SCHEMAFULL;
                    DEFINE FIELD IF NOT EXISTS title        ON book TYPE string ASSERT $value != "";
                    DEFINE FIELD IF NOT EXISTS author       ON book TYPE string ASSERT $value != "";
                    DEFINE FIELD IF NOT EXISTS description  ON book TYPE string;
                    DEFINE FIELD IF NOT EXISTS price        ON book TYPE number ASSERT $value >= 0;
                    DEFINE FIELD IF NOT EXISTS image        ON book TYPE string;
                    DEFINE FIELD IF NOT EXISTS isbn         ON book TYPE string ASSERT $value != "";
                    DEFINE FIELD IF NOT EXISTS genre        ON book TYPE array<string>;
                    DEFINE FIELD IF NOT EXISTS tags         ON book TYPE array<string>;
                    DEFINE FIELD IF NOT EXISTS published    ON book TYPE datetime;
                    DEFINE FIELD IF NOT EXISTS pages        ON book TYPE int;
                    DEFINE FIELD IF NOT EXISTS language     ON book TYPE string;
                    DEFINE FIELD IF NOT EXISTS publisher    ON book TYPE string;
                    DEFINE FIELD IF NOT EXISTS rating       ON book TYPE number ASSERT $value >= 0 AND $value <= 5;
                    DEFINE FIELD IF NOT EXISTS review_count ON book TYPE int;
                    DEFINE FIELD IF NOT EXISTS in_stock     ON book TYPE bool;
                    DEFINE FIELD IF NOT EXISTS featured     ON book TYPE bool;
                    DEFINE INDEX IF NOT EXISTS book_isbn_unique ON book FIELDS isbn UNIQUE;
                    "#,
            },
            Migration {
                id: "002_review",
                up: r#"
                    DEFINE TABLE IF NOT EXISTS review SCHEMAFULL;
                    DEFINE FIELD IF NOT EXISTS book      ON review TYPE record<book>;
                    DEFINE FIELD IF NOT EXISTS author    ON review TYPE string ASSERT $value != "";
                    DEFINE FIELD IF NOT EXISTS rating    ON review TYPE int ASSERT $value >= 1 AND $value <= 5;
                    DEFINE FIELD IF NOT EXISTS title     ON review TYPE string;
                    DEFINE FIELD IF NOT EXISTS comment   ON review TYPE string;
                    DEFINE FIELD IF NOT EXISTS posted_at ON review TYPE datetime DEFAULT time::now();
                    DEFINE FIELD IF NOT EXISTS verified  ON review TYPE bool DEFAULT false;
                    DEFINE INDEX IF NOT EXISTS review_book_idx ON review FIELDS book;
                    "#,
            },
        ]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module.
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}
