//! Integration tests for snapshot persistence.
//!
//! Mutations must leave a complete, reloadable snapshot behind, through both
//! the file-backed and the in-memory storage adapters.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use driftwood_cart::notify::{RecordingNotifier, messages};
use driftwood_cart::storage::{FileSnapshotStore, SnapshotStore, StorageError};
use driftwood_cart::{CartError, CartStore};
use driftwood_core::{LineItem, ProductId};
use driftwood_integration_tests::{TEST_CART_KEY, TestCart, init_tracing};

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("driftwood-it-{}", uuid::Uuid::new_v4()))
}

async fn seeded_catalog() -> driftwood_cart::catalog::InMemoryCatalog {
    let catalog = driftwood_cart::catalog::InMemoryCatalog::new();
    catalog
        .insert(
            driftwood_cart::catalog::Product {
                id: ProductId::new(1),
                title: "Belt".to_string(),
                price: Decimal::new(5990, 2),
                image: "belt.jpg".to_string(),
            },
            10,
        )
        .await;
    catalog
        .insert(
            driftwood_cart::catalog::Product {
                id: ProductId::new(2),
                title: "Cap".to_string(),
                price: Decimal::new(2990, 2),
                image: "cap.jpg".to_string(),
            },
            10,
        )
        .await;
    catalog
}

// =============================================================================
// File-Backed Round Trips
// =============================================================================

#[tokio::test]
async fn test_file_backed_cart_survives_restart() {
    init_tracing();
    let dir = temp_dir();
    let catalog = seeded_catalog().await;

    let store = CartStore::open(
        Arc::new(catalog.clone()),
        Arc::new(FileSnapshotStore::new(dir.clone())),
        Arc::new(RecordingNotifier::new()),
        TEST_CART_KEY,
    )
    .await
    .unwrap();
    store.add_product(ProductId::new(1)).await.unwrap();
    store.add_product(ProductId::new(2)).await.unwrap();
    store.add_product(ProductId::new(2)).await.unwrap();
    let written = store.items().await;
    drop(store);

    let reopened = CartStore::open(
        Arc::new(catalog),
        Arc::new(FileSnapshotStore::new(dir)),
        Arc::new(RecordingNotifier::new()),
        TEST_CART_KEY,
    )
    .await
    .unwrap();

    assert_eq!(reopened.items().await, written);
}

#[tokio::test]
async fn test_corrupted_snapshot_file_falls_back_to_empty() {
    init_tracing();
    let dir = temp_dir();
    let storage = FileSnapshotStore::new(dir);
    storage.set(TEST_CART_KEY, "{not json at all").await.unwrap();

    let store = CartStore::open(
        Arc::new(seeded_catalog().await),
        Arc::new(storage.clone()),
        Arc::new(RecordingNotifier::new()),
        TEST_CART_KEY,
    )
    .await
    .unwrap();
    assert!(store.items().await.is_empty());

    // The first mutation replaces the corrupted document.
    store.add_product(ProductId::new(1)).await.unwrap();
    let snapshot = storage.get(TEST_CART_KEY).await.unwrap().unwrap();
    let persisted: Vec<LineItem> = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(persisted.len(), 1);
}

// =============================================================================
// In-Memory Round Trips
// =============================================================================

#[tokio::test]
async fn test_in_memory_cart_reloads_ids_amounts_and_order() {
    let cart = TestCart::new().await;
    cart.seed(1, "Belt", Decimal::new(5990, 2), 10).await;
    cart.seed(2, "Cap", Decimal::new(2990, 2), 10).await;
    cart.store.add_product(ProductId::new(2)).await.unwrap();
    cart.store.add_product(ProductId::new(1)).await.unwrap();
    cart.store
        .update_product_amount(ProductId::new(2), 6)
        .await
        .unwrap();

    let reopened = CartStore::open(
        Arc::new(cart.catalog.clone()),
        Arc::new(cart.storage.clone()),
        Arc::new(RecordingNotifier::new()),
        TEST_CART_KEY,
    )
    .await
    .unwrap();

    let items = reopened.items().await;
    assert_eq!(items, cart.store.items().await);
    assert_eq!(items[0].id, ProductId::new(2));
    assert_eq!(items[0].amount, 6);
    assert_eq!(items[1].id, ProductId::new(1));
    assert_eq!(items[1].amount, 1);
}

// =============================================================================
// Snapshot Format
// =============================================================================

#[tokio::test]
async fn test_snapshot_is_json_array_with_published_field_names() {
    let cart = TestCart::new().await;
    cart.seed(1, "Belt", Decimal::new(5990, 2), 10).await;
    cart.store.add_product(ProductId::new(1)).await.unwrap();

    let snapshot = cart.storage.get(TEST_CART_KEY).await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&snapshot).unwrap();

    let lines = value.as_array().unwrap();
    assert_eq!(lines.len(), 1);

    let mut keys: Vec<&str> = lines[0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, ["amount", "id", "image", "price", "title"]);
}

// =============================================================================
// Write-Failure Policy
// =============================================================================

struct DetachedDisk;

#[async_trait]
impl SnapshotStore for DetachedDisk {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk detached")))
    }
}

#[tokio::test]
async fn test_failed_write_keeps_memory_commit_and_notifies_once() {
    init_tracing();
    let notifier = RecordingNotifier::new();
    let store = CartStore::open(
        Arc::new(seeded_catalog().await),
        Arc::new(DetachedDisk),
        Arc::new(notifier.clone()),
        TEST_CART_KEY,
    )
    .await
    .unwrap();

    let result = store.add_product(ProductId::new(1)).await;

    assert!(matches!(result, Err(CartError::Storage(_))));
    assert_eq!(store.items().await.len(), 1);
    assert_eq!(notifier.messages(), vec![messages::ADD_FAILED]);
}
