//! Storefront client for the Bookstall API.
//!
//! Mirrors what the browser side of the store does: typed fetches against
//! the catalog endpoints, a shopping cart persisted in client-owned local
//! storage, and view models for the catalog, book detail, and cart pages.
//! The server never sees cart state; book data fetched here is a read-only,
//! potentially stale snapshot.

pub mod api;
pub mod cart;
pub mod model;
pub mod pages;
pub mod stars;

pub use api::{ApiClient, ClientError};
pub use cart::{Cart, CartEvent, CartItem};
pub use stars::StarRating;
