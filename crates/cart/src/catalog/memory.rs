//! In-memory catalog implementation for tests and offline use.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use driftwood_core::ProductId;

use crate::catalog::types::{Product, StockInfo};
use crate::catalog::{Catalog, CatalogError};

/// In-memory catalog.
///
/// Stores products and stock levels in shared maps and counts lookups, so
/// tests can assert how often the cart consulted the catalog. An optional
/// artificial latency widens the window in which concurrent operations
/// overlap. Cloning shares the underlying data.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    stock: Arc<RwLock<HashMap<ProductId, u32>>>,
    stock_calls: Arc<AtomicUsize>,
    product_calls: Arc<AtomicUsize>,
    latency: Option<Duration>,
}

impl InMemoryCatalog {
    /// Creates a new empty in-memory catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog that sleeps before answering each lookup.
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Register a product and its stock level.
    pub async fn insert(&self, product: Product, stock: u32) {
        let id = product.id;
        self.products.write().await.insert(id, product);
        self.stock.write().await.insert(id, stock);
    }

    /// Overwrite the stock level for a product.
    pub async fn set_stock(&self, id: ProductId, stock: u32) {
        self.stock.write().await.insert(id, stock);
    }

    /// Number of stock lookups served so far.
    #[must_use]
    pub fn stock_calls(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }

    /// Number of product lookups served so far.
    #[must_use]
    pub fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn stock(&self, id: ProductId) -> Result<StockInfo, CatalogError> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.stock
            .read()
            .await
            .get(&id)
            .map(|&amount| StockInfo { id, amount })
            .ok_or(CatalogError::NotFound(id))
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.products
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Decimal::new(1990, 2),
            image: format!("{id}.jpg"),
        }
    }

    #[tokio::test]
    async fn test_serves_registered_stock_and_product() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(product(1), 4).await;

        let stock = catalog.stock(ProductId::new(1)).await.unwrap();
        assert_eq!(stock.amount, 4);

        let found = catalog.product(ProductId::new(1)).await.unwrap();
        assert_eq!(found.title, "Product 1");
    }

    #[tokio::test]
    async fn test_unknown_id_not_found() {
        let catalog = InMemoryCatalog::new();

        let result = catalog.stock(ProductId::new(99)).await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));

        let result = catalog.product(ProductId::new(99)).await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_counts_every_lookup() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(product(1), 4).await;

        catalog.stock(ProductId::new(1)).await.unwrap();
        catalog.stock(ProductId::new(1)).await.unwrap();
        catalog.product(ProductId::new(1)).await.unwrap();

        assert_eq!(catalog.stock_calls(), 2);
        assert_eq!(catalog.product_calls(), 1);
    }

    #[tokio::test]
    async fn test_set_stock_overwrites() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(product(1), 4).await;
        catalog.set_stock(ProductId::new(1), 0).await;

        let stock = catalog.stock(ProductId::new(1)).await.unwrap();
        assert_eq!(stock.amount, 0);
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let catalog = InMemoryCatalog::new();
        let clone = catalog.clone();
        catalog.insert(product(1), 4).await;

        assert!(clone.stock(ProductId::new(1)).await.is_ok());
        assert_eq!(catalog.stock_calls(), 1);
    }
}
