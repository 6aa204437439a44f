//! Driftwood Cart - session cart state manager.
//!
//! Holds the ordered line items of one session's cart, validates quantities
//! against the catalog's live stock levels, persists a full snapshot to
//! durable key-value storage after every mutation, and surfaces failures as
//! user-facing notifications.
//!
//! # Architecture
//!
//! The store is built from three injected ports:
//!
//! - [`catalog::Catalog`] - stock and product lookups (HTTP or in-memory)
//! - [`storage::SnapshotStore`] - durable key-value persistence (file-backed
//!   or in-memory)
//! - [`notify::Notifier`] - fire-and-forget user-facing error messages
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use driftwood_cart::CartStore;
//! use driftwood_cart::catalog::InMemoryCatalog;
//! use driftwood_cart::notify::TracingNotifier;
//! use driftwood_cart::storage::InMemorySnapshotStore;
//! use driftwood_core::ProductId;
//!
//! # async fn demo() -> Result<(), driftwood_cart::CartError> {
//! let store = CartStore::open(
//!     Arc::new(InMemoryCatalog::new()),
//!     Arc::new(InMemorySnapshotStore::new()),
//!     Arc::new(TracingNotifier),
//!     "driftwood:cart",
//! )
//! .await?;
//!
//! store.add_product(ProductId::new(1)).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod storage;
pub mod store;

pub use config::{CartConfig, CatalogConfig, ConfigError};
pub use error::CartError;
pub use store::{CartStore, CartSummary};
