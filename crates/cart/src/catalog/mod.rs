//! Catalog API port: stock and product lookups.
//!
//! # Architecture
//!
//! - The cart store consults the catalog on every mutating operation: stock
//!   before add/update, product metadata when a product first enters the cart
//! - The catalog is source of truth for purchasable quantities - stock
//!   responses are never cached
//! - [`HttpCatalog`] talks to the store's REST API; [`InMemoryCatalog`]
//!   backs tests and offline use

pub mod http;
pub mod memory;
pub mod types;

pub use http::HttpCatalog;
pub use memory::InMemoryCatalog;
pub use types::{Product, StockInfo};

use async_trait::async_trait;
use driftwood_core::ProductId;
use thiserror::Error;

/// Errors that can occur when querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// No product with this id.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configured API token is not a valid header value.
    #[error("invalid API token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
}

/// Read access to the product catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Current stock level for a product.
    ///
    /// Must be answered fresh: the cart decides whether a purchase is
    /// possible on the returned value.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the lookup fails.
    async fn stock(&self, id: ProductId) -> Result<StockInfo, CatalogError>;

    /// Catalog metadata for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the lookup fails.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;
}
