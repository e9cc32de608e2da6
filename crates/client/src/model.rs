//! Wire types as the storefront sees them. Field names match the API's
//! camelCase JSON; dates stay RFC 3339 strings on this side of the wire.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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
