//! Integration tests for Driftwood.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p driftwood-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_operations` - add/remove/update flows against in-memory adapters
//! - `cart_persistence` - snapshot round-trips through file and memory stores
//! - `cart_concurrency` - serialization of concurrent mutations

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Once};

use rust_decimal::Decimal;

use driftwood_cart::CartStore;
use driftwood_cart::catalog::{InMemoryCatalog, Product};
use driftwood_cart::notify::RecordingNotifier;
use driftwood_cart::storage::InMemorySnapshotStore;
use driftwood_core::ProductId;

/// Storage key used by every test cart.
pub const TEST_CART_KEY: &str = "driftwood:cart";

static INIT_TRACING: Once = Once::new();

/// Initialize a test subscriber once for the whole test binary.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A cart store wired to fresh in-memory adapters, with handles kept for
/// seeding and assertions.
pub struct TestCart {
    pub store: CartStore,
    pub catalog: InMemoryCatalog,
    pub storage: InMemorySnapshotStore,
    pub notifier: RecordingNotifier,
}

impl TestCart {
    /// Open a store over empty in-memory adapters.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be opened; reading empty in-memory
    /// storage never fails.
    pub async fn new() -> Self {
        Self::with_catalog(InMemoryCatalog::new()).await
    }

    /// Open a store over the given catalog and empty in-memory storage.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be opened; reading empty in-memory
    /// storage never fails.
    pub async fn with_catalog(catalog: InMemoryCatalog) -> Self {
        init_tracing();

        let storage = InMemorySnapshotStore::new();
        let notifier = RecordingNotifier::new();
        let store = CartStore::open(
            Arc::new(catalog.clone()),
            Arc::new(storage.clone()),
            Arc::new(notifier.clone()),
            TEST_CART_KEY,
        )
        .await
        .expect("open cart store over in-memory adapters");

        Self {
            store,
            catalog,
            storage,
            notifier,
        }
    }

    /// Register a product and its stock level with the catalog.
    pub async fn seed(&self, id: i32, title: &str, price: Decimal, stock: u32) {
        self.catalog
            .insert(
                Product {
                    id: ProductId::new(id),
                    title: title.to_string(),
                    price,
                    image: format!("https://cdn.driftwoodsupply.com/p/{id}.jpg"),
                },
                stock,
            )
            .await;
    }
}
