//! Typed HTTP access to the catalog endpoints.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{Book, Review};

/// Errors surfaced by API calls. `NotFound` is split out so callers can
/// treat a missing book differently from a broken connection.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("resource not found")]
    NotFound,

    #[error("server returned status {status}")]
    Status { status: u16 },
}

/// Client for the read-only catalog API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the API at `base_url` (e.g. `http://127.0.0.1:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// All books in the catalog.
    pub async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        self.get_json("/api/books").await
    }

    /// One book by id.
    pub async fn get_book(&self, id: &str) -> Result<Book, ClientError> {
        self.get_json(&format!("/api/books/{id}")).await
    }

    /// All reviews for a book; empty when the book has none.
    pub async fn reviews_for_book(&self, id: &str) -> Result<Vec<Review>, ClientError> {
        self.get_json(&format!("/api/books/{id}/reviews")).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.http.get(self.endpoint(path)).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            status if !status.is_success() => Err(ClientError::Status {
                status: status.as_u16(),
            }),
            _ => Ok(response.json().await?),
        }
    }
}
